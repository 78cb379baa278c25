//! The 8x8 board: pure occupancy data with accessors and mutators.
//!
//! The board holds at most one piece per square and knows nothing about
//! the rules. Legality, turn order, and history all live in
//! [`crate::game::Game`]; `set_piece` overwrites unconditionally and it is
//! the caller's responsibility to keep the position meaningful.

use std::fmt;

use crate::board_square::Square;
use crate::piece::Piece;
use crate::piece_color::PieceColor;
use crate::piece_kind::PieceKind;
use crate::utils::render_game_state::render_board;

/// Back-rank layout shared by both sides, columns 1 through 8.
const BACK_RANK_KINDS: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// An empty board with no pieces on it.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// A board holding the standard 32-piece starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// The piece on `square`, if any. No side effects.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize - 1][square.column() as usize - 1]
    }

    /// Places `piece` on `square`, overwriting whatever was there.
    /// `None` clears the square. No validation happens here.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize - 1][square.column() as usize - 1] = piece;
    }

    /// Clears the board and lays out the standard starting position:
    /// White on rows 1 and 2, Black on rows 7 and 8.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];
        for (index, kind) in BACK_RANK_KINDS.into_iter().enumerate() {
            let column = index as u8 + 1;
            self.set_piece(
                Square::at(1, column),
                Some(Piece::new(PieceColor::White, kind)),
            );
            self.set_piece(
                Square::at(2, column),
                Some(Piece::new(PieceColor::White, PieceKind::Pawn)),
            );
            self.set_piece(
                Square::at(7, column),
                Some(Piece::new(PieceColor::Black, PieceKind::Pawn)),
            );
            self.set_piece(
                Square::at(8, column),
                Some(Piece::new(PieceColor::Black, kind)),
            );
        }
    }

    /// Iterates every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_board(self))
    }
}
