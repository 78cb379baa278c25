//! Queen movement rule: the union of the rook and bishop rays.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::rook_moves::rook_moves;
use crate::piece_color::PieceColor;

/// Generates all geometrically reachable queen moves from `start`.
/// Occupancy only; no check filtering.
pub fn queen_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = rook_moves(board, start, color);
    result.extend(bishop_moves(board, start, color));
    result
}
