//! A piece and its movement-rule dispatch point.

use crate::board::Board;
use crate::board_square::Square;
use crate::chess_move::ChessMove;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;
use crate::piece_color::PieceColor;
use crate::piece_kind::PieceKind;

/// A chess piece: a color and a kind, nothing more. A piece has no
/// identity beyond the square that holds it; moving a piece means removing
/// the value from one square and inserting it at another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Generates the geometrically reachable moves for this piece standing
    /// on `start`, considering only board occupancy: friendly pieces block,
    /// enemy pieces are capturable, and nothing here filters for check.
    /// Castling and en passant are appended one layer up by the game, which
    /// owns the history those moves depend on.
    ///
    /// The match is exhaustive over `PieceKind`, so a new kind cannot be
    /// added without a movement rule.
    pub fn raw_moves(&self, board: &Board, start: Square) -> Vec<ChessMove> {
        match self.kind {
            PieceKind::King => king_moves(board, start, self.color),
            PieceKind::Queen => queen_moves(board, start, self.color),
            PieceKind::Rook => rook_moves(board, start, self.color),
            PieceKind::Bishop => bishop_moves(board, start, self.color),
            PieceKind::Knight => knight_moves(board, start, self.color),
            PieceKind::Pawn => pawn_moves(board, start, self.color),
        }
    }

    /// The FEN letter for this piece: uppercase for White, lowercase for
    /// Black.
    pub fn fen_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.fen_letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.fen_letter(),
        }
    }

    /// Maps a FEN letter to a piece; uppercase is White, lowercase Black.
    pub fn from_fen_char(letter: char) -> Option<Self> {
        let kind = PieceKind::from_fen_letter(letter)?;
        let color = if letter.is_ascii_uppercase() {
            PieceColor::White
        } else if letter.is_ascii_lowercase() {
            PieceColor::Black
        } else {
            return None;
        };
        Some(Piece::new(color, kind))
    }
}
