//! Move values and long algebraic notation.

use std::fmt;

use crate::board_square::Square;
use crate::chess_errors::ChessErrors;
use crate::piece_kind::PieceKind;

/// A proposed or executed move: origin, destination, and an optional
/// promotion kind. Equality is structural; the promotion field is only
/// meaningful for a pawn reaching the far rank.
///
/// A move carries no capture or special-move payload. The game re-derives
/// castling and en passant from the position and its history, so a move
/// parsed from notation needs no game context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    pub const fn new(from: Square, to: Square) -> Self {
        ChessMove {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        ChessMove {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parses long algebraic notation such as `"e2e4"` or `"e7e8q"`.
    ///
    /// # Returns
    /// * `Ok(ChessMove)` on success.
    /// * `Err(ChessErrors)` if the string is not four or five characters,
    ///   a coordinate is out of range, or the promotion letter is not one
    ///   of q, r, b, n (either case).
    pub fn from_long_algebraic(text: &str) -> Result<Self, ChessErrors> {
        let trimmed = text.trim();
        if !trimmed.is_ascii() || (trimmed.len() != 4 && trimmed.len() != 5) {
            return Err(ChessErrors::InvalidAlgebraicString(text.to_string()));
        }
        let from = Square::from_algebraic(&trimmed[0..2])?;
        let to = Square::from_algebraic(&trimmed[2..4])?;
        let promotion = match trimmed.as_bytes().get(4) {
            None => None,
            Some(letter) => match letter.to_ascii_lowercase() {
                b'q' => Some(PieceKind::Queen),
                b'r' => Some(PieceKind::Rook),
                b'b' => Some(PieceKind::Bishop),
                b'n' => Some(PieceKind::Knight),
                _ => return Err(ChessErrors::InvalidAlgebraicChar(*letter as char)),
            },
        };
        Ok(ChessMove {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_letter())?;
        }
        Ok(())
    }
}
