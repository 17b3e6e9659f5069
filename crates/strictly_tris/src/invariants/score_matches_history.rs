//! Bookkeeping consistency between score and history.

use super::super::MatchEngine;
use super::Invariant;
use strum::IntoEnumIterator;

/// Invariant: each player's score equals their wins in the history.
pub struct ScoreMatchesHistoryInvariant;

impl Invariant<MatchEngine> for ScoreMatchesHistoryInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        crate::Player::iter().all(|player| {
            u64::from(engine.score().get(player)) == engine.history().wins_of(player) as u64
        })
    }

    fn description() -> &'static str {
        "Score agrees with the winners recorded in the history"
    }
}
