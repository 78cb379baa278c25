//! Perft: exhaustive legal-move-path counting.
//!
//! Walking every legal move sequence to a fixed depth and tallying what
//! kinds of moves occur is the standard way to validate move generation
//! against the published reference counts for well-known positions; the
//! castling / en-passant / promotion tallies pin down exactly the rule
//! families that are easiest to get subtly wrong.

use crate::chess_errors::ChessErrors;
use crate::chess_move::ChessMove;
use crate::game::Game;
use crate::piece_kind::PieceKind;

/// Tallies of the leaf moves reached by a perft walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
}

/// Counts every legal move path of length `depth` from `game`.
///
/// # Returns
/// * `Ok(PerftCounts)` with the tallies at the final depth.
/// * `Err(ChessErrors)` only if a generated move fails to apply, which
///   would itself be a move-generation bug; interior nodes are applied
///   through `make_move`, so the walk re-validates everything it plays.
pub fn perft(game: &Game, depth: u8) -> Result<PerftCounts, ChessErrors> {
    let mut counts = PerftCounts::default();
    perft_walk(game, depth, &mut counts)?;
    Ok(counts)
}

fn perft_walk(game: &Game, depth: u8, counts: &mut PerftCounts) -> Result<(), ChessErrors> {
    if depth == 0 {
        return Ok(());
    }
    for chess_move in game.legal_moves() {
        if depth == 1 {
            counts.nodes += 1;
            classify_move(game, &chess_move, counts);
            continue;
        }
        let mut next = game.clone();
        next.make_move(chess_move)?;
        perft_walk(&next, depth - 1, counts)?;
    }
    Ok(())
}

/// Classifies a legal move against the position it is about to be played
/// in. En passant counts as a capture, as the reference tables do.
fn classify_move(game: &Game, chess_move: &ChessMove, counts: &mut PerftCounts) {
    let Some(piece) = game.board().piece_at(chess_move.from) else {
        return;
    };
    let column_travel = chess_move.to.column().abs_diff(chess_move.from.column());

    if piece.kind == PieceKind::King && column_travel == 2 {
        counts.castles += 1;
    } else if piece.kind == PieceKind::Pawn
        && column_travel == 1
        && game.board().piece_at(chess_move.to).is_none()
    {
        counts.en_passants += 1;
        counts.captures += 1;
    } else if game.board().piece_at(chess_move.to).is_some() {
        counts.captures += 1;
    }

    if chess_move.promotion.is_some() {
        counts.promotions += 1;
    }
}
