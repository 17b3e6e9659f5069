//! Tally consistency: the per-line counters agree with the grid.

use super::super::{Cell, Coord, MatchEngine};
use super::Invariant;
use strum::IntoEnumIterator;

/// Invariant: every counter equals the marks it claims to count.
///
/// Rows and columns count the player's marks in that line. The diagonal
/// sequences hold 1 at column `k` iff the player owns the diagonal cell
/// in that column.
pub struct CountersMatchBoardInvariant;

impl Invariant<MatchEngine> for CountersMatchBoardInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        let board = engine.board();
        let n = board.size().get();

        crate::Player::iter().all(|player| {
            let tally = engine.counters().for_player(player);
            let owns = |row: usize, col: usize| {
                usize::from(board.get(Coord::new(row, col)) == Some(Cell::Occupied(player)))
            };

            tally.size() == n
                && (0..n).all(|i| {
                    let in_row: usize = (0..n).map(|k| owns(i, k)).sum();
                    let in_col: usize = (0..n).map(|k| owns(k, i)).sum();

                    tally.rows()[i] == in_row
                        && tally.columns()[i] == in_col
                        && tally.diagonal()[i] == owns(i, i)
                        && tally.opposite_diagonal()[i] == owns(n - 1 - i, i)
                })
        })
    }

    fn description() -> &'static str {
        "Line counters match the marks on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatchConfig, Player};

    #[test]
    fn test_holds_on_empty_board() {
        let engine = MatchEngine::new(MatchConfig::default());
        assert!(CountersMatchBoardInvariant::holds(&engine));
    }

    #[test]
    fn test_holds_after_diagonal_moves() {
        let mut engine = MatchEngine::new(MatchConfig::default());
        for (row, col) in [(1, 1), (0, 2), (2, 0), (0, 0)] {
            engine.place(Coord::new(row, col)).unwrap();
        }
        assert!(CountersMatchBoardInvariant::holds(&engine));
    }

    #[test]
    fn test_untracked_mark_violates() {
        let mut engine = MatchEngine::new(MatchConfig::default());
        engine.board.place(Coord::new(1, 2), Player::O).unwrap();
        assert!(!CountersMatchBoardInvariant::holds(&engine));
    }
}
