//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} place {Q}`. Preconditions always run; postconditions run in debug
//! builds.

use super::action::{MoveError, Placement};
use super::invariants::{InvariantSet, MatchInvariants};
use super::{Board, Cell, MatchEngine};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// The slice of state captured before the action for the postcondition.
    type Before;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &Self::Before, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the round must be accepting placements.
pub struct PhaseIsOpen;

impl PhaseIsOpen {
    /// Fails with [`MoveError::PhaseClosed`] outside `InProgress`.
    #[instrument(skip(engine))]
    pub fn check(engine: &MatchEngine) -> Result<(), MoveError> {
        let phase = engine.phase();
        if phase.accepts_moves() {
            Ok(())
        } else {
            Err(MoveError::PhaseClosed(phase))
        }
    }
}

/// Precondition: the coordinate must be on the board.
pub struct WithinBoard;

impl WithinBoard {
    /// Fails with [`MoveError::OutOfBounds`].
    #[instrument(skip(engine))]
    pub fn check(placement: &Placement, engine: &MatchEngine) -> Result<(), MoveError> {
        let size = engine.board().size();
        if size.contains(placement.coord) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds {
                row: placement.coord.row(),
                col: placement.coord.col(),
                size: size.get(),
            })
        }
    }
}

/// Precondition: the target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveError::Occupied`].
    #[instrument(skip(engine))]
    pub fn check(placement: &Placement, engine: &MatchEngine) -> Result<(), MoveError> {
        if engine.board().is_empty(placement.coord) {
            Ok(())
        } else {
            Err(MoveError::Occupied(placement.coord))
        }
    }
}

/// Composite precondition: open phase, on the board, empty cell.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement, in order.
    #[instrument(skip(engine))]
    pub fn check(placement: &Placement, engine: &MatchEngine) -> Result<(), MoveError> {
        PhaseIsOpen::check(engine)?;
        WithinBoard::check(placement, engine)?;
        CellIsEmpty::check(placement, engine)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions:
/// - Round is in progress
/// - Coordinate is on the board
/// - Cell is empty
///
/// Postconditions:
/// - Exactly one new mark, earlier marks untouched
/// - Every match invariant holds
pub struct PlacementContract;

impl Contract<MatchEngine, Placement> for PlacementContract {
    type Before = Board;

    fn pre(engine: &MatchEngine, placement: &Placement) -> Result<(), MoveError> {
        LegalPlacement::check(placement, engine)
    }

    fn post(before: &Board, after: &MatchEngine) -> Result<(), MoveError> {
        if !MarksPreserved::holds(before, after.board()) {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: placement must add exactly one mark".to_string(),
            ));
        }

        MatchInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Transition property: a placement adds one mark and rewrites none.
pub struct MarksPreserved;

impl MarksPreserved {
    /// Compares the boards on either side of a placement.
    #[instrument(skip_all)]
    pub fn holds(old: &Board, new: &Board) -> bool {
        if old.size() != new.size() {
            return false;
        }

        let kept = old
            .cells()
            .iter()
            .zip(new.cells())
            .all(|(was, now)| *was == Cell::Empty || was == now);
        let valid = kept && new.occupied_count() == old.occupied_count() + 1;
        if !valid {
            warn!(
                before = old.occupied_count(),
                after = new.occupied_count(),
                "Placement rewrote the board"
            );
        }
        valid
    }
}

/// Asserts that all match invariants hold (panics on violation in debug builds).
#[instrument(skip(engine))]
pub fn assert_invariants(engine: &MatchEngine) {
    debug_assert!(
        MatchInvariants::check_all(engine).is_ok(),
        "Match invariants violated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, GamePhase, MatchConfig, Player};

    fn engine() -> MatchEngine {
        MatchEngine::new(MatchConfig::default())
    }

    #[test]
    fn test_precondition_empty_cell() {
        let engine = engine();
        let placement = Placement::new(Player::X, Coord::new(1, 1));
        assert!(PlacementContract::pre(&engine, &placement).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let mut engine = engine();
        engine.place(Coord::new(1, 1)).unwrap();

        let placement = Placement::new(Player::O, Coord::new(1, 1));
        assert!(matches!(
            PlacementContract::pre(&engine, &placement),
            Err(MoveError::Occupied(_))
        ));
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let engine = engine();
        let placement = Placement::new(Player::X, Coord::new(0, 7));
        assert!(matches!(
            PlacementContract::pre(&engine, &placement),
            Err(MoveError::OutOfBounds { col: 7, .. })
        ));
    }

    #[test]
    fn test_precondition_phase_checked_first() {
        let mut engine = engine();
        engine.phase = GamePhase::Won;

        // Off the board as well, but the closed phase wins.
        let placement = Placement::new(Player::X, Coord::new(9, 9));
        assert_eq!(
            PlacementContract::pre(&engine, &placement),
            Err(MoveError::PhaseClosed(GamePhase::Won))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let mut engine = engine();
        let before = engine.board().clone();
        engine.place(Coord::new(0, 0)).unwrap();
        assert!(PlacementContract::post(&before, &engine).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let mut engine = engine();
        let before = engine.board().clone();
        engine.place(Coord::new(0, 0)).unwrap();
        engine.board.place(Coord::new(2, 2), Player::O).unwrap();

        assert!(matches!(
            PlacementContract::post(&before, &engine),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_marks_preserved_compares_boards_only() {
        let before = Board::default();
        let mut after = before.clone();
        after.place(Coord::new(1, 1), Player::X).unwrap();
        assert!(MarksPreserved::holds(&before, &after));

        // No new mark, or a different board size.
        assert!(!MarksPreserved::holds(&before, &before));
        assert!(!MarksPreserved::holds(
            &before,
            &Board::new(crate::Dimension::new(4).unwrap())
        ));
    }

    #[test]
    fn test_failed_postcondition_restores_board_and_counters() {
        let mut engine = engine();
        engine.place(Coord::new(0, 0)).unwrap();
        // The board already disagrees with the tallies.
        engine.board.place(Coord::new(2, 2), Player::O).unwrap();
        let board = engine.board().clone();
        let counters = engine.counters().clone();
        let player = engine.current_player();

        let result = engine.place(Coord::new(1, 1));
        if cfg!(debug_assertions) {
            assert!(matches!(result, Err(MoveError::InvariantViolation(_))));
            assert_eq!(engine.board(), &board);
            assert_eq!(engine.counters(), &counters);
            assert_eq!(engine.current_player(), player);
        }
    }
}
