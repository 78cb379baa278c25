//! Errors used throughout the chess rules engine.
//!
//! The enum `ChessErrors` is the single error type across the crate to
//! simplify propagation and matching. Each variant carries contextual
//! information where appropriate to aid diagnostics and user-facing error
//! messages.
//!
//! Usage guidelines:
//! - Functions in the engine return `Result<..., ChessErrors>` for
//!   recoverable or expected failure modes (invalid input, illegal moves).
//! - A rejected move never mutates the game; callers can match on the
//!   variant to present friendly messages or to prompt for another move.

use thiserror::Error;

use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::piece_color::PieceColor;

/// Unified error type for the chess rules engine.
///
/// Each variant corresponds to a specific, identifiable failure mode that
/// can occur while constructing coordinates, parsing notation, or
/// attempting a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A (row, column) pair outside the 8x8 board was used to construct a
    /// square.
    #[error("square ({row}, {column}) is outside the 8x8 board")]
    InvalidSquare { row: u8, column: u8 },

    /// Stepping from `start` by the delta `(d_row, d_column)` would leave
    /// the board. Move generators consume this to clip rays and offsets.
    #[error("stepping from {start} by ({d_row}, {d_column}) leaves the board")]
    OutOfBounds {
        start: Square,
        d_row: i8,
        d_column: i8,
    },

    /// A move or query named a square with no piece on it.
    #[error("no piece at {0}")]
    NoPieceAtSquare(Square),

    /// The piece at the move's origin belongs to the side that is not on
    /// turn. The game is left unchanged.
    #[error("the piece at {square} belongs to {color}, who is not on turn")]
    WrongTurn { square: Square, color: PieceColor },

    /// The move is not among the legal moves for the piece at its origin:
    /// geometrically blocked, it would leave the mover's own king in check,
    /// or its castling / en-passant / promotion conditions do not hold. The
    /// game is left unchanged.
    #[error("move {0} is not legal in this position")]
    IllegalMove(ChessMove),

    /// A single character used during algebraic parsing was invalid (a file
    /// outside 'a'..'h', a rank outside '1'..'8', or a bad promotion
    /// letter).
    #[error("invalid character '{0}' in an algebraic coordinate")]
    InvalidAlgebraicChar(char),

    /// A multi-character algebraic string failed to parse as a move or
    /// square.
    #[error("cannot interpret '{0}' as long algebraic notation")]
    InvalidAlgebraicString(String),

    /// An unexpected character was found while parsing a FEN record.
    #[error("invalid character '{0}' in a FEN record")]
    InvalidFenChar(char),

    /// A FEN record had malformed structure; the payload describes which
    /// field was at fault.
    #[error("malformed FEN record: {0}")]
    InvalidFenString(String),
}
