//! Win detection from line tallies.

use super::super::counters::LineCounters;
use super::super::types::Coord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A full-length line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Row `i`.
    Row(usize),
    /// Column `j`.
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    OppositeDiagonal,
}

impl Line {
    /// Every cell on this line for a board of side `n`.
    pub fn cells(self, n: usize) -> Vec<Coord> {
        (0..n)
            .map(|k| match self {
                Line::Row(row) => Coord::new(row, k),
                Line::Column(col) => Coord::new(k, col),
                Line::Diagonal => Coord::new(k, k),
                Line::OppositeDiagonal => Coord::new(k, n - 1 - k),
            })
            .collect()
    }
}

/// The completed line plus its cells, for highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    line: Line,
    cells: Vec<Coord>,
}

impl WinningLine {
    /// Builds the winning line for a board of side `n`.
    pub fn new(line: Line, n: usize) -> Self {
        Self {
            line,
            cells: line.cells(n),
        }
    }

    /// Which line was completed.
    pub fn line(&self) -> Line {
        self.line
    }

    /// Cells of the line, in increasing row order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// True if `coord` is part of the line.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Decides whether the tallies describe a completed line.
///
/// Checked in order: rows, columns, main diagonal, opposite diagonal.
/// The first match is reported. Runs in O(N).
#[instrument(skip_all, fields(n = counters.size()))]
pub fn detect_win(counters: &LineCounters) -> Option<WinningLine> {
    let n = counters.size();

    if let Some(row) = counters.rows().iter().position(|&c| c == n) {
        return Some(WinningLine::new(Line::Row(row), n));
    }

    if let Some(col) = counters.columns().iter().position(|&c| c == n) {
        return Some(WinningLine::new(Line::Column(col), n));
    }

    if counters.diagonal().iter().all(|&c| c >= 1) {
        return Some(WinningLine::new(Line::Diagonal, n));
    }

    if counters.opposite_diagonal().iter().all(|&c| c >= 1) {
        return Some(WinningLine::new(Line::OppositeDiagonal, n));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    fn tally(n: usize, coords: &[(usize, usize)]) -> LineCounters {
        let mut counters = LineCounters::new(Dimension::new(n).unwrap());
        for &(row, col) in coords {
            counters.record_move(Coord::new(row, col)).unwrap();
        }
        counters
    }

    #[test]
    fn test_no_winner_empty() {
        assert_eq!(detect_win(&tally(3, &[])), None);
    }

    #[test]
    fn test_row_win() {
        let win = detect_win(&tally(3, &[(0, 0), (0, 1), (0, 2)])).unwrap();
        assert_eq!(win.line(), Line::Row(0));
        assert_eq!(
            win.cells(),
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );
    }

    #[test]
    fn test_column_win() {
        let win = detect_win(&tally(4, &[(0, 2), (1, 2), (2, 2), (3, 2)])).unwrap();
        assert_eq!(win.line(), Line::Column(2));
        assert!(win.contains(Coord::new(3, 2)));
    }

    #[test]
    fn test_diagonal_win() {
        let win = detect_win(&tally(3, &[(0, 0), (1, 1), (2, 2)])).unwrap();
        assert_eq!(win.line(), Line::Diagonal);
    }

    #[test]
    fn test_opposite_diagonal_win() {
        let win = detect_win(&tally(4, &[(0, 3), (1, 2), (2, 1), (3, 0)])).unwrap();
        assert_eq!(win.line(), Line::OppositeDiagonal);
        assert_eq!(
            win.cells(),
            &[
                Coord::new(0, 3),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 0)
            ]
        );
    }

    #[test]
    fn test_incomplete_lines() {
        assert_eq!(detect_win(&tally(3, &[(0, 0), (0, 1)])), None);
        assert_eq!(detect_win(&tally(4, &[(0, 0), (1, 1), (2, 2)])), None);
        assert_eq!(detect_win(&tally(3, &[(0, 0), (1, 0), (0, 1), (2, 2)])), None);
    }

    #[test]
    fn test_row_checked_before_diagonal() {
        // Completes row 0 and the main diagonal at once.
        let win = detect_win(&tally(3, &[(1, 1), (2, 2), (0, 1), (0, 2), (0, 0)])).unwrap();
        assert_eq!(win.line(), Line::Row(0));
    }
}
