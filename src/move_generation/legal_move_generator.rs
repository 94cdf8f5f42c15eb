//! Full legal move generation pipeline.
//!
//! Collects each piece's pseudo-legal destinations, adds castling and en
//! passant, then simulates every candidate and drops those that leave the
//! mover's own king attacked. Promotions are generated once per destination
//! with a queen; the match swaps in a human's choice at commit time.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Coord, PieceKind, SquareSet};
use crate::move_generation::legal_move_checks::leaves_king_safe;
use crate::move_generation::special_moves::{castling_moves, classify_move, en_passant_moves};
use crate::moves::move_descriptions::Move;
use crate::moves::piece_moves::possible_fields;

fn candidate_moves(board: &Board, from: Coord) -> Vec<Move> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };
    let own = board.occupancy(piece.color);
    let opponent = board.occupancy(piece.color.opposite());

    let mut out: Vec<Move> = possible_fields(&piece, own, opponent)
        .iter()
        .filter_map(|to| classify_move(board, from, to, PieceKind::Queen))
        .collect();

    match piece.kind {
        PieceKind::Pawn => out.extend(en_passant_moves(board, &piece)),
        PieceKind::King => out.extend(castling_moves(board, &piece)),
        _ => {}
    }
    out
}

/// Legal moves of the piece on `from`, simulated in place on `board`.
pub fn legal_moves_for_piece(board: &mut Board, from: Coord) -> ChessResult<Vec<Move>> {
    let mut legal = Vec::new();
    for mv in candidate_moves(board, from) {
        if leaves_king_safe(board, &mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

/// Every legal move for `color`, simulated in place on `board`.
pub fn legal_moves_in_place(board: &mut Board, color: Color) -> ChessResult<Vec<Move>> {
    let origins: Vec<Coord> = board.pieces_of(color).map(|p| p.position).collect();
    let mut legal = Vec::with_capacity(48);
    for from in origins {
        legal.extend(legal_moves_for_piece(board, from)?);
    }
    Ok(legal)
}

/// Every legal move for `color` on a scratch copy of `board`.
pub fn legal_moves(board: &Board, color: Color) -> ChessResult<Vec<Move>> {
    let mut scratch = board.clone();
    legal_moves_in_place(&mut scratch, color)
}

pub fn legal_destinations(board: &Board, from: Coord) -> ChessResult<SquareSet> {
    let mut scratch = board.clone();
    Ok(legal_moves_for_piece(&mut scratch, from)?
        .into_iter()
        .map(|mv| mv.to)
        .collect())
}

/// Legal destinations grouped by origin, pieces without moves omitted.
pub fn legal_destinations_by_piece(
    board: &Board,
    color: Color,
) -> ChessResult<Vec<(Coord, SquareSet)>> {
    let mut scratch = board.clone();
    let origins: Vec<Coord> = scratch.pieces_of(color).map(|p| p.position).collect();
    let mut out = Vec::new();
    for from in origins {
        let destinations: SquareSet = legal_moves_for_piece(&mut scratch, from)?
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        if !destinations.is_empty() {
            out.push((from, destinations));
        }
    }
    Ok(out)
}
