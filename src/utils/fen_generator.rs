//! Game-to-FEN generator: the inverse of the parser.

use crate::board_square::Square;
use crate::game::Game;
use crate::piece_color::PieceColor;
use crate::piece_kind::PieceKind;

/// Renders the game as a six-field FEN record. The clock fields are not
/// tracked by the engine and are emitted as `0 1`.
pub fn generate_fen(game: &Game) -> String {
    let board = generate_board_field(game);
    let side_to_move = match game.turn() {
        PieceColor::White => "w",
        PieceColor::Black => "b",
    };
    let castling = generate_castling_field(game);
    let en_passant = generate_en_passant_field(game);

    format!("{board} {side_to_move} {castling} {en_passant} 0 1")
}

fn generate_board_field(game: &Game) -> String {
    let mut out = String::new();

    for row in (1..=8).rev() {
        let mut empty_run = 0u8;

        for column in 1..=8 {
            if let Some(piece) = game.board().piece_at(Square::at(row, column)) {
                if empty_run > 0 {
                    out.push(char::from(b'0' + empty_run));
                    empty_run = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_run += 1;
            }
        }

        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if row > 1 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game: &Game) -> String {
    let rights = game.castling_rights();
    let mut out = String::new();

    if rights.can_castle_kingside(PieceColor::White) {
        out.push('K');
    }
    if rights.can_castle_queenside(PieceColor::White) {
        out.push('Q');
    }
    if rights.can_castle_kingside(PieceColor::Black) {
        out.push('k');
    }
    if rights.can_castle_queenside(PieceColor::Black) {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

/// The en-passant target square: the square the last double-stepping pawn
/// jumped over, emitted only while the capture window is open.
fn generate_en_passant_field(game: &Game) -> String {
    let Some(last) = game.last_move() else {
        return "-".to_string();
    };
    let still_a_pawn = game
        .board()
        .piece_at(last.to)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn);
    if !still_a_pawn || last.to.row().abs_diff(last.from.row()) != 2 {
        return "-".to_string();
    }
    let jumped_row = (last.from.row() + last.to.row()) / 2;
    Square::at(jumped_row, last.to.column()).to_string()
}
