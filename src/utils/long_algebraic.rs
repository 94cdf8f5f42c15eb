//! Long algebraic notation (`e2e4`, `a7a8q`) for squares and moves.
//!
//! Used by the self-play binary and the match harness for move logs, and by
//! tests to script games readably.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Coord, PieceKind};
use crate::move_generation::special_moves::{classify_move, is_promotion};
use crate::moves::move_descriptions::Move;

/// Convert a square such as `"e4"` to a coordinate.
pub fn algebraic_to_coord(square: &str) -> ChessResult<Coord> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(square.to_owned()));
    }

    Ok(Coord::new((b'8' - rank) as i8, (file - b'a') as i8))
}

pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

/// Origin, destination and optional promotion piece of `"e7e8q"`-style text.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Coord, Coord, Option<PieceKind>)> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidNotation(text.to_owned()));
    }
    let from = algebraic_to_coord(&text[0..2])?;
    let to = algebraic_to_coord(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        Some(&ch) => Some(char_to_promotion(ch as char)?),
        None => None,
    };
    Ok((from, to, promotion))
}

/// Describe `text` as a move on `board`. The move is not checked for
/// legality; a pawn reaching the last rank without a suffix promotes to a
/// queen.
pub fn long_algebraic_to_move(text: &str, board: &Board) -> ChessResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    let piece = board.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
    if promotion.is_some() && !is_promotion(piece, to) {
        return Err(ChessError::InvalidNotation(text.to_owned()));
    }
    classify_move(board, from, to, promotion.unwrap_or(PieceKind::Queen))
        .ok_or(ChessError::IllegalMove { from, to })
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::InvalidNotation(ch.to_string())),
    }
}
