//! Placement actions and the errors they can raise.
//!
//! A placement is a domain event: it can be validated against the
//! current state before anything is mutated.

use super::phases::GamePhase;
use super::types::{Coord, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player putting a mark on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player placing the mark.
    pub player: Player,
    /// Target cell.
    pub coord: Coord,
}

impl Placement {
    /// Creates a new placement.
    #[instrument]
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coord)
    }
}

/// Why a placement was refused.
///
/// Every variant leaves the match untouched; hosts are expected to
/// treat a refusal as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside `[0, N)`.
    #[display("Cell ({}, {}) is outside the {}x{} board", row, col, size, size)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Current board size.
        size: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Coord),

    /// The match is not accepting placements right now.
    #[display("Placements are closed while the round is {}", _0)]
    PhaseClosed(GamePhase),

    /// A postcondition failed after the placement was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
