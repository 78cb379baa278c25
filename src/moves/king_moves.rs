//! King movement rule.
//!
//! Only the plain one-square steps live here. Castling needs history
//! (which king and rook have moved) and check information, so the game
//! appends it; and squares that would leave the king attacked are filtered
//! out one layer up by the king-safety simulation, which also covers
//! adjacency to the enemy king.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::shared_moves::try_step_move;
use crate::piece_color::PieceColor;

/// Generates the king's geometrically reachable one-square steps:
/// the up-to-eight adjacent squares not occupied by a friendly piece.
pub fn king_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = Vec::new();
    for d_row in -1..=1 {
        for d_column in -1..=1 {
            if d_row == 0 && d_column == 0 {
                continue;
            }
            if let Ok(stop) = start.offset(d_row, d_column) {
                try_step_move(board, color, start, stop, &mut result);
            }
        }
    }
    result
}
