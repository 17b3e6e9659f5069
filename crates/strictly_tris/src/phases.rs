//! Match phases and round outcomes.

use super::types::Player;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Where the match currently stands.
///
/// `Won` and `Drawn` are transient: the engine leaves them when the host
/// fires the scheduled transition. `MatchOver` is terminal until a new match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum GamePhase {
    /// Placements are accepted.
    #[default]
    #[display("in progress")]
    InProgress,
    /// A line was completed; waiting for the round to be scored.
    #[display("won")]
    Won,
    /// Board filled with no line; waiting for the board to be cleared.
    #[display("drawn")]
    Drawn,
    /// Someone passed the score threshold.
    #[display("over")]
    MatchOver,
}

impl GamePhase {
    /// True while placements are accepted.
    pub fn accepts_moves(self) -> bool {
        self == GamePhase::InProgress
    }
}

/// Result of a resolved round, as stored in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    Winner(Player),
    /// Board filled up first.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Short badge for the history strip: `P1`, `P2` or `D`.
    pub fn label(&self) -> String {
        match self {
            Outcome::Winner(player) => format!("P{}", player.number()),
            Outcome::Draw => "D".to_string(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player.number()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_in_progress_accepts_moves() {
        assert!(GamePhase::InProgress.accepts_moves());
        assert!(!GamePhase::Won.accepts_moves());
        assert!(!GamePhase::Drawn.accepts_moves());
        assert!(!GamePhase::MatchOver.accepts_moves());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Winner(Player::X).label(), "P1");
        assert_eq!(Outcome::Winner(Player::O).label(), "P2");
        assert_eq!(Outcome::Draw.label(), "D");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Winner(Player::O).to_string(), "Player 2 wins");
        assert_eq!(Outcome::Draw.to_string(), "Draw");
        assert!(Outcome::Draw.is_draw());
        assert_eq!(Outcome::Winner(Player::X).winner(), Some(Player::X));
    }
}
