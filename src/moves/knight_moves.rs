//! Knight movement rule.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::shared_moves::try_step_move;
use crate::piece_color::PieceColor;

/// The eight L-shaped offsets, as (row, column) deltas.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Generates all geometrically reachable knight moves from `start`.
/// The knight leaps over occupied squares; only a friendly piece on the
/// destination excludes a move. No check filtering.
pub fn knight_moves(board: &Board, start: Square, color: PieceColor) -> Vec<ChessMove> {
    let mut result = Vec::new();
    for (d_row, d_column) in KNIGHT_OFFSETS {
        if let Ok(stop) = start.offset(d_row, d_column) {
            try_step_move(board, color, start, stop, &mut result);
        }
    }
    result
}
