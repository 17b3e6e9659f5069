//! Per-player line tallies.
//!
//! Each player owns four length-N sequences counting their marks along
//! every row, every column and both diagonals. Win detection reads these
//! instead of rescanning the board, which keeps each check at O(N).

use super::action::MoveError;
use super::types::{Coord, Dimension, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One player's marks per line.
///
/// The diagonal sequences are keyed by column. Each diagonal has exactly
/// one cell per column, so "every entry is at least one" means the player
/// has marked the whole diagonal. That only holds because marks are never
/// removed within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LineCounters {
    /// Marks in each row.
    rows: Vec<usize>,
    /// Marks in each column.
    columns: Vec<usize>,
    /// Marks on the main diagonal, by column.
    diagonal: Vec<usize>,
    /// Marks on the opposite diagonal, by column.
    opposite_diagonal: Vec<usize>,
}

impl LineCounters {
    /// Zeroed tallies for an N x N board.
    pub fn new(size: Dimension) -> Self {
        let n = size.get();
        Self {
            rows: vec![0; n],
            columns: vec![0; n],
            diagonal: vec![0; n],
            opposite_diagonal: vec![0; n],
        }
    }

    /// Side length the tallies were sized for.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Counts a mark at `coord`.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfBounds`] if `coord` is off the board; nothing is
    /// counted.
    pub fn record_move(&mut self, coord: Coord) -> Result<(), MoveError> {
        let (row, col) = (coord.row(), coord.col());
        let n = self.size();
        if row >= n || col >= n {
            return Err(MoveError::OutOfBounds { row, col, size: n });
        }

        self.rows[row] += 1;
        self.columns[col] += 1;

        if row == col {
            self.diagonal[col] += 1;
        }

        if row + col == n - 1 {
            self.opposite_diagonal[col] += 1;
        }
        Ok(())
    }

    /// Zeroes everything and resizes to `size`.
    pub fn reset(&mut self, size: Dimension) {
        *self = Self::new(size);
    }
}

/// Both players' tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    x: LineCounters,
    o: LineCounters,
}

impl Counters {
    /// Zeroed tallies for both players.
    #[instrument]
    pub fn new(size: Dimension) -> Self {
        Self {
            x: LineCounters::new(size),
            o: LineCounters::new(size),
        }
    }

    /// Tallies for `player`.
    pub fn for_player(&self, player: Player) -> &LineCounters {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    /// Counts `player`'s mark at `coord`.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfBounds`] if `coord` is off the board.
    #[instrument(skip(self))]
    pub fn record_move(&mut self, player: Player, coord: Coord) -> Result<(), MoveError> {
        match player {
            Player::X => self.x.record_move(coord),
            Player::O => self.o.record_move(coord),
        }
    }

    /// Zeroes both players and resizes to `size`.
    #[instrument(skip(self))]
    pub fn reset(&mut self, size: Dimension) {
        self.x.reset(size);
        self.o.reset(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(n: usize) -> Dimension {
        Dimension::new(n).unwrap()
    }

    #[test]
    fn test_corner_touches_row_column_and_diagonal() {
        let mut counters = LineCounters::new(dim(3));
        counters.record_move(Coord::new(0, 0)).unwrap();

        assert_eq!(counters.rows(), &vec![1, 0, 0]);
        assert_eq!(counters.columns(), &vec![1, 0, 0]);
        assert_eq!(counters.diagonal(), &vec![1, 0, 0]);
        assert_eq!(counters.opposite_diagonal(), &vec![0, 0, 0]);
    }

    #[test]
    fn test_anti_corner_touches_opposite_diagonal() {
        let mut counters = LineCounters::new(dim(4));
        counters.record_move(Coord::new(0, 3)).unwrap();

        assert_eq!(counters.diagonal(), &vec![0, 0, 0, 0]);
        assert_eq!(counters.opposite_diagonal(), &vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_odd_center_touches_both_diagonals() {
        let mut counters = LineCounters::new(dim(5));
        counters.record_move(Coord::new(2, 2)).unwrap();

        assert_eq!(counters.diagonal()[2], 1);
        assert_eq!(counters.opposite_diagonal()[2], 1);
    }

    #[test]
    fn test_off_diagonal_cell() {
        let mut counters = LineCounters::new(dim(3));
        counters.record_move(Coord::new(1, 0)).unwrap();

        assert_eq!(counters.rows(), &vec![0, 1, 0]);
        assert_eq!(counters.columns(), &vec![1, 0, 0]);
        assert!(counters.diagonal().iter().all(|c| *c == 0));
        assert!(counters.opposite_diagonal().iter().all(|c| *c == 0));
    }

    #[test]
    fn test_players_are_tracked_separately() {
        let mut counters = Counters::new(dim(3));
        counters.record_move(Player::X, Coord::new(0, 0)).unwrap();
        counters.record_move(Player::O, Coord::new(0, 1)).unwrap();

        assert_eq!(counters.for_player(Player::X).rows()[0], 1);
        assert_eq!(counters.for_player(Player::O).rows()[0], 1);
        assert_eq!(counters.for_player(Player::X).columns()[1], 0);
    }

    #[test]
    fn test_off_board_move_is_refused() {
        let mut counters = Counters::new(dim(3));
        counters.record_move(Player::X, Coord::new(0, 0)).unwrap();
        let before = counters.clone();

        assert_eq!(
            counters.record_move(Player::X, Coord::new(3, 0)),
            Err(MoveError::OutOfBounds {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert!(counters.record_move(Player::O, Coord::new(1, 7)).is_err());
        assert_eq!(counters, before);
    }

    #[test]
    fn test_reset_resizes_and_zeroes() {
        let mut counters = Counters::new(dim(3));
        counters.record_move(Player::X, Coord::new(1, 1)).unwrap();
        counters.reset(dim(6));

        let x = counters.for_player(Player::X);
        assert_eq!(x.size(), 6);
        assert!(x.rows().iter().all(|c| *c == 0));
        assert!(x.diagonal().iter().all(|c| *c == 0));
    }
}
