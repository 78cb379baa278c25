//! Uniform random move selection.
//!
//! The simplest possible opponent: pick any legal move with equal
//! probability. Callers embedding the engine can use it as a stand-in
//! player; the test suite uses it to fuzz the game invariants through
//! long arbitrary move sequences.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::chess_errors::ChessErrors;
use crate::chess_move::ChessMove;
use crate::game::Game;

/// Picks one of the side to move's legal moves uniformly at random, or
/// `None` when the game is over (checkmate or stalemate).
pub fn choose_random_move<R: Rng>(game: &Game, rng: &mut R) -> Option<ChessMove> {
    let moves: Vec<ChessMove> = game.legal_moves().into_iter().collect();
    moves.choose(rng).copied()
}

/// Plays random moves on `game` until the side to move has none left or
/// `max_plies` moves have been made.
///
/// # Returns
/// * `Ok(plies)` - How many moves were actually played.
/// * `Err(ChessErrors)` - Only if a generated move is rejected, which
///   would indicate a bug in move generation.
pub fn play_random_game<R: Rng>(
    game: &mut Game,
    max_plies: u32,
    rng: &mut R,
) -> Result<u32, ChessErrors> {
    let mut played = 0;
    for _ in 0..max_plies {
        let Some(chess_move) = choose_random_move(game, rng) else {
            break;
        };
        game.make_move(chess_move)?;
        played += 1;
    }
    Ok(played)
}
