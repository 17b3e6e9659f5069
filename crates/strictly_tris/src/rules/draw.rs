//! Draw detection.

use super::super::board::Board;
use super::super::counters::LineCounters;
use super::win::detect_win;
use tracing::instrument;

/// A full board on which the last mover completed nothing.
#[instrument(skip_all)]
pub fn is_draw(board: &Board, mover: &LineCounters) -> bool {
    board.is_full() && detect_win(mover).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::Counters;
    use crate::rules::{Line, Verdict, evaluate};
    use crate::types::{Coord, Dimension, Player};

    fn play(grid: [&str; 3]) -> (Board, Counters) {
        let size = Dimension::default();
        let mut board = Board::new(size);
        let mut counters = Counters::new(size);
        for (row, line) in grid.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let player = match symbol {
                    'X' => Player::X,
                    'O' => Player::O,
                    _ => continue,
                };
                let coord = Coord::new(row, col);
                board.place(coord, player).unwrap();
                counters.record_move(player, coord).unwrap();
            }
        }
        (board, counters)
    }

    #[test]
    fn test_partial_board_not_draw() {
        let (board, counters) = play(["X..", ".O.", "..."]);
        assert!(!is_draw(&board, counters.for_player(Player::O)));
    }

    #[test]
    fn test_draw_detection() {
        let (board, counters) = play(["XOX", "OXO", "OXO"]);
        assert!(board.is_full());
        assert!(is_draw(&board, counters.for_player(Player::X)));
        assert!(is_draw(&board, counters.for_player(Player::O)));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let (board, counters) = play(["XXX", "OOX", "XOO"]);
        assert!(board.is_full());
        assert!(!is_draw(&board, counters.for_player(Player::X)));
    }

    #[test]
    fn test_evaluate_reports_draw_on_full_board() {
        let (board, counters) = play(["XOX", "OXO", "OXO"]);
        assert_eq!(evaluate(&board, counters.for_player(Player::O)), Verdict::Draw);
    }

    #[test]
    fn test_evaluate_prefers_win_on_full_board() {
        let (board, counters) = play(["XXX", "OOX", "XOO"]);
        match evaluate(&board, counters.for_player(Player::X)) {
            Verdict::Win(line) => assert_eq!(line.line(), Line::Row(0)),
            other => panic!("expected a win, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_continues_on_open_board() {
        let (board, counters) = play(["X..", ".O.", "..."]);
        assert_eq!(
            evaluate(&board, counters.for_player(Player::O)),
            Verdict::Continue
        );
    }
}
