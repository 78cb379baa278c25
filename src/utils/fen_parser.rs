//! FEN-to-Game parser.
//!
//! Builds a game from a Forsyth-Edwards Notation string: board layout,
//! side to move, castling rights, and en-passant target. The two clock
//! fields are validated but not retained; the engine does not track the
//! fifty-move rule.

use crate::board::Board;
use crate::board_square::Square;
use crate::castling_rights::CastlingRights;
use crate::chess_errors::ChessErrors;
use crate::chess_move::ChessMove;
use crate::game::Game;
use crate::piece::Piece;
use crate::piece_color::PieceColor;

/// Parses a six-field FEN record into a game.
///
/// # Returns
/// * `Ok(Game)` on success.
/// * `Err(ChessErrors::InvalidFenString)` when a field is missing,
///   trailing fields remain, or a field has the wrong shape.
/// * `Err(ChessErrors::InvalidFenChar)` when a character inside a field is
///   not recognized.
pub fn parse_fen(fen: &str) -> Result<Game, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = next_field(&mut parts, "missing board layout")?;
    let side_part = next_field(&mut parts, "missing side-to-move field")?;
    let castling_part = next_field(&mut parts, "missing castling rights field")?;
    let en_passant_part = next_field(&mut parts, "missing en-passant field")?;
    let halfmove_part = next_field(&mut parts, "missing halfmove clock")?;
    let fullmove_part = next_field(&mut parts, "missing fullmove number")?;

    if parts.next().is_some() {
        return Err(ChessErrors::InvalidFenString(
            "extra trailing fields".to_string(),
        ));
    }

    let board = parse_board(board_part)?;
    let turn = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let last_move = parse_en_passant(en_passant_part)?;

    // Clocks are checked for shape, then dropped.
    for clock in [halfmove_part, fullmove_part] {
        clock.parse::<u16>().map_err(|_| {
            ChessErrors::InvalidFenString(format!("invalid clock field '{clock}'"))
        })?;
    }

    Ok(Game::from_parts(board, turn, castling_rights, last_move))
}

fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    complaint: &str,
) -> Result<&'a str, ChessErrors> {
    parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidFenString(complaint.to_string()))
}

fn parse_board(board_part: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenString(
            "board layout must contain 8 ranks".to_string(),
        ));
    }

    let mut board = Board::empty();
    for (rank_index, rank_text) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let row = 8 - rank_index as u8;
        let mut column = 1u8;

        for ch in rank_text.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessErrors::InvalidFenChar(ch));
                }
                column += run as u8;
                continue;
            }
            let piece = Piece::from_fen_char(ch).ok_or(ChessErrors::InvalidFenChar(ch))?;
            if column > 8 {
                return Err(ChessErrors::InvalidFenString(format!(
                    "rank {row} has too many files"
                )));
            }
            board.set_piece(Square::at(row, column), Some(piece));
            column += 1;
        }

        if column != 9 {
            return Err(ChessErrors::InvalidFenString(format!(
                "rank {row} does not sum to 8 files"
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<PieceColor, ChessErrors> {
    match side_part {
        "w" => Ok(PieceColor::White),
        "b" => Ok(PieceColor::Black),
        _ => Err(ChessErrors::InvalidFenString(format!(
            "invalid side-to-move field '{side_part}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    // The field lists the castles still available; an absent letter means
    // that castle is gone, which the record tracks on the rook flag.
    let mut rights = CastlingRights {
        white_kingside_rook_moved: true,
        white_queenside_rook_moved: true,
        black_kingside_rook_moved: true,
        black_queenside_rook_moved: true,
        ..CastlingRights::default()
    };

    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside_rook_moved = false,
            'Q' => rights.white_queenside_rook_moved = false,
            'k' => rights.black_kingside_rook_moved = false,
            'q' => rights.black_queenside_rook_moved = false,
            _ => return Err(ChessErrors::InvalidFenChar(ch)),
        }
    }

    Ok(rights)
}

/// Rehydrates the en-passant target square into the double-step move that
/// must have produced it, which is all the history en-passant legality
/// needs.
fn parse_en_passant(en_passant_part: &str) -> Result<Option<ChessMove>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let target = Square::from_algebraic(en_passant_part)?;
    let (from_row, to_row) = match target.row() {
        // White just advanced two rows past the target.
        3 => (2, 4),
        // Black equivalent.
        6 => (7, 5),
        _ => {
            return Err(ChessErrors::InvalidFenString(format!(
                "en-passant target '{en_passant_part}' is not on rank 3 or 6"
            )))
        }
    };
    Ok(Some(ChessMove::new(
        Square::at(from_row, target.column()),
        Square::at(to_row, target.column()),
    )))
}
