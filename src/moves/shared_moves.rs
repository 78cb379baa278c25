//! Helpers shared by the per-piece movement rules.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::piece_color::PieceColor;

/// Tries to add the move `start -> stop` to `result` based on occupancy:
/// an empty square and an enemy-occupied square are both reachable, a
/// friendly piece blocks.
///
/// # Returns
/// * `true` when a ray may continue past `stop` (the square was empty).
/// * `false` when the ray ends here (a piece of either side occupies it).
pub(crate) fn try_step_move(
    board: &Board,
    color: PieceColor,
    start: Square,
    stop: Square,
    result: &mut Vec<ChessMove>,
) -> bool {
    match board.piece_at(stop) {
        None => {
            result.push(ChessMove::new(start, stop));
            true
        }
        Some(target) if target.color != color => {
            // Capture; the ray stops on the victim's square.
            result.push(ChessMove::new(start, stop));
            false
        }
        Some(_) => false,
    }
}

/// Follows one ray direction from `start`, adding every reachable square
/// until the board edge or a blocking piece. Used by the sliding pieces
/// (bishop, rook, queen).
pub(crate) fn follow_move_ray(
    board: &Board,
    color: PieceColor,
    start: Square,
    d_row: i8,
    d_column: i8,
    result: &mut Vec<ChessMove>,
) {
    for distance in 1..8 {
        match start.offset(d_row * distance, d_column * distance) {
            Ok(stop) => {
                if !try_step_move(board, color, start, stop, result) {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}
