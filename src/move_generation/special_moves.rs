//! Castling, en passant and promotion.
//!
//! Each special transition is a separate rule layered over normal moves;
//! `classify_move` turns a `(from, to)` pair into exactly one `Move` kind.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{lane_for_king_destination, CASTLING_LANES, KING_HOME_COL};
use crate::game_state::chess_types::{Coord, PieceKind};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_checks::attacked_by;
use crate::moves::move_descriptions::Move;

/// Castling moves available to the king on `king`.
///
/// Requires an unmoved king on its home square, an unmoved own rook in the
/// lane's corner, empty squares between them, and no attacked square on the
/// king's path, including the square it starts on.
pub fn castling_moves(board: &Board, king: &Piece) -> Vec<Move> {
    let mut out = Vec::new();
    if king.kind != PieceKind::King || king.has_moved {
        return out;
    }
    let row = king.color.back_row();
    if king.position != Coord::new(row, KING_HOME_COL) {
        return out;
    }

    let enemy_attacks = attacked_by(board, king.color.opposite());
    if enemy_attacks.contains(king.position) {
        return out;
    }

    for lane in CASTLING_LANES {
        let rook_ok = board
            .piece_at(Coord::new(row, lane.rook_from_col))
            .is_some_and(|rook| {
                rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
            });
        if !rook_ok {
            continue;
        }
        let clear = lane
            .between_cols
            .iter()
            .all(|col| board.piece_at(Coord::new(row, *col)).is_none());
        if !clear {
            continue;
        }
        let safe = lane
            .path_cols
            .iter()
            .all(|col| !enemy_attacks.contains(Coord::new(row, *col)));
        if !safe {
            continue;
        }
        out.push(Move::castle(king.position, Coord::new(row, lane.king_to_col)));
    }

    out
}

/// En-passant captures for `pawn`: an enemy pawn stands beside it with its
/// flag set from the previous ply and the square behind it is empty.
pub fn en_passant_moves(board: &Board, pawn: &Piece) -> Vec<Move> {
    let mut out = Vec::new();
    if pawn.kind != PieceKind::Pawn {
        return out;
    }
    for d_col in [-1i8, 1] {
        let Some(beside) = pawn.position.offset(0, d_col) else {
            continue;
        };
        let Some(victim) = board.piece_at(beside) else {
            continue;
        };
        if victim.kind != PieceKind::Pawn || victim.color == pawn.color || !victim.is_en_passant {
            continue;
        }
        let Some(to) = pawn.position.offset(pawn.color.forward(), d_col) else {
            continue;
        };
        if board.piece_at(to).is_none() {
            out.push(Move::en_passant(pawn.position, to, *victim));
        }
    }
    out
}

#[inline]
pub fn is_promotion(piece: &Piece, to: Coord) -> bool {
    piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row()
}

/// Describe the move `from -> to` on the current board. Promotions carry
/// `promotion` as the new piece. The move is not checked for legality.
pub fn classify_move(board: &Board, from: Coord, to: Coord, promotion: PieceKind) -> Option<Move> {
    let piece = board.piece_at(from)?;
    let captured = board.piece_at(to).copied();

    if piece.kind == PieceKind::King
        && (to.col - from.col).abs() == 2
        && to.row == from.row
        && lane_for_king_destination(to.col).is_some()
    {
        return Some(Move::castle(from, to));
    }

    if piece.kind == PieceKind::Pawn && to.col != from.col && captured.is_none() {
        let victim = board.piece_at(Coord::new(from.row, to.col))?;
        return Some(Move::en_passant(from, to, *victim));
    }

    if is_promotion(piece, to) {
        return Some(Move::promotion(from, to, captured, promotion));
    }

    Some(Move::normal(from, to, captured))
}
