//! Pawn movement rule.
//!
//! Forward marches, the double step from the starting row, and diagonal
//! captures. Any move landing on the far rank is expanded into the four
//! promotion moves and the plain version is discarded. En passant is not
//! generated here: it depends on the opponent's previous move, which only
//! the game remembers.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::piece_color::PieceColor;
use crate::piece_kind::PROMOTION_KINDS;

/// Generates all geometrically reachable pawn moves from `start`.
/// Occupancy only; no check filtering.
///
/// # Arguments
/// * `board` - The current occupancy.
/// * `start` - The pawn's square.
/// * `color` - The pawn's side, which fixes the forward direction.
///
/// # Returns
/// * `Vec<ChessMove>` - Marches and captures, with far-rank landings
///   expanded to one move per promotable kind.
pub fn pawn_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = Vec::new();
    let forward = color.forward_direction();

    // Forward march, one square, only onto an empty square
    if let Ok(stop) = start.offset(forward, 0) {
        if board.piece_at(stop).is_none() {
            push_pawn_move(color, start, stop, &mut result);

            // Double step from the starting row; both squares must be empty
            if start.row() == color.pawn_start_row() {
                if let Ok(double_stop) = start.offset(2 * forward, 0) {
                    if board.piece_at(double_stop).is_none() {
                        push_pawn_move(color, start, double_stop, &mut result);
                    }
                }
            }
        }
    }

    // Diagonal captures, only when an enemy piece occupies the target
    for d_column in [-1, 1] {
        if let Ok(stop) = start.offset(forward, d_column) {
            if let Some(target) = board.piece_at(stop) {
                if target.color != color {
                    push_pawn_move(color, start, stop, &mut result);
                }
            }
        }
    }

    result
}

/// Adds `start -> stop`, expanding a far-rank landing into the four
/// promotion moves in place of the plain move.
fn push_pawn_move(color: PieceColor, start: Square, stop: Square, result: &mut Vec<ChessMove>) {
    if stop.row() == color.promotion_row() {
        for kind in PROMOTION_KINDS {
            result.push(ChessMove::promoting(start, stop, kind));
        }
    } else {
        result.push(ChessMove::new(start, stop));
    }
}
