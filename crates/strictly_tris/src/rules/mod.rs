//! Round rules for N x N tic-tac-toe.
//!
//! Pure functions over the board and the mover's tallies. Rules are kept
//! apart from board storage so the engine can compose them freely.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{Line, WinningLine, detect_win};

use super::board::Board;
use super::counters::LineCounters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What the last placement did to the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The mover completed a line.
    Win(WinningLine),
    /// No line, and no empty cell left.
    Draw,
    /// Play on.
    Continue,
}

/// Evaluates the round after a placement, using the mover's tallies.
///
/// A win is always checked first; a full board only counts as a draw when
/// the final mark did not complete a line.
#[instrument(skip_all)]
pub fn evaluate(board: &Board, mover: &LineCounters) -> Verdict {
    if let Some(line) = detect_win(mover) {
        return Verdict::Win(line);
    }
    if is_draw(board, mover) {
        Verdict::Draw
    } else {
        Verdict::Continue
    }
}
