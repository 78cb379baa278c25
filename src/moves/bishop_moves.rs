//! Bishop movement rule.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::shared_moves::follow_move_ray;
use crate::piece_color::PieceColor;

/// Generates all geometrically reachable bishop moves from `start`.
/// Occupancy only; no check filtering.
///
/// # Arguments
/// * `board` - The current occupancy.
/// * `start` - The bishop's square.
/// * `color` - The bishop's side.
///
/// # Returns
/// * `Vec<ChessMove>` - Every square on the four diagonal rays, with the
///   same blocking rule as the rook.
pub fn bishop_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = Vec::new();
    // Try all 4 bishop directions until collision
    // Up right
    follow_move_ray(board, color, start, 1, 1, &mut result);
    // Up left
    follow_move_ray(board, color, start, 1, -1, &mut result);
    // Down right
    follow_move_ray(board, color, start, -1, 1, &mut result);
    // Down left
    follow_move_ray(board, color, start, -1, -1, &mut result);
    result
}
