//! Rook movement rule.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::shared_moves::follow_move_ray;
use crate::piece_color::PieceColor;

/// Generates all geometrically reachable rook moves from `start`.
/// Occupancy only; no check filtering.
///
/// # Arguments
/// * `board` - The current occupancy.
/// * `start` - The rook's square.
/// * `color` - The rook's side.
///
/// # Returns
/// * `Vec<ChessMove>` - Every square on the four orthogonal rays up to and
///   including the first enemy piece, excluding friendly blockers.
pub fn rook_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = Vec::new();
    // Try all 4 rook directions until collision
    // Up
    follow_move_ray(board, color, start, 1, 0, &mut result);
    // Down
    follow_move_ray(board, color, start, -1, 0, &mut result);
    // Left
    follow_move_ray(board, color, start, 0, -1, &mut result);
    // Right
    follow_move_ray(board, color, start, 0, 1, &mut result);
    result
}
