//! Turn balance: players alternate within a round.

use super::super::{MatchEngine, Player};
use super::Invariant;

/// Invariant: the two players' mark counts differ by at most one.
pub struct BalancedMarksInvariant;

impl Invariant<MatchEngine> for BalancedMarksInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        let x = engine.board().marks_of(Player::X);
        let o = engine.board().marks_of(Player::O);
        x.abs_diff(o) <= 1
    }

    fn description() -> &'static str {
        "Players alternate turns within a round"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, MatchConfig};

    #[test]
    fn test_alternating_play_holds() {
        let mut engine = MatchEngine::new(MatchConfig::default());
        for (row, col) in [(0, 0), (0, 1), (1, 0)] {
            engine.place(Coord::new(row, col)).unwrap();
            assert!(BalancedMarksInvariant::holds(&engine));
        }
    }

    #[test]
    fn test_double_move_violates() {
        let mut engine = MatchEngine::new(MatchConfig::default());
        engine.place(Coord::new(0, 0)).unwrap();
        engine.board.place(Coord::new(2, 2), Player::X).unwrap();
        assert!(!BalancedMarksInvariant::holds(&engine));
    }
}
