//! Per-kind dispatch over the field generators.
//!
//! These are pure functions of a piece and the two occupancy sets; nothing is
//! cached between calls.

use crate::game_state::chess_types::{PieceKind, SquareSet};
use crate::game_state::piece::Piece;
use crate::moves::bishop_moves::bishop_fields;
use crate::moves::king_moves::{king_attacked_fields, king_protected_fields};
use crate::moves::knight_moves::{knight_attacked_fields, knight_protected_fields};
use crate::moves::pawn_moves::{pawn_attacked_fields, pawn_possible_fields, pawn_protected_fields};
use crate::moves::queen_moves::queen_fields;
use crate::moves::rook_moves::rook_fields;
use crate::moves::sliding::RayFields;

fn fields(piece: &Piece, own: SquareSet, opponent: SquareSet) -> RayFields {
    let from = piece.position;
    match piece.kind {
        PieceKind::Pawn => RayFields {
            attacked: pawn_attacked_fields(piece.color, from, own),
            protected: pawn_protected_fields(piece.color, from, own),
        },
        PieceKind::Knight => RayFields {
            attacked: knight_attacked_fields(from, own),
            protected: knight_protected_fields(from, own),
        },
        PieceKind::Bishop => bishop_fields(from, own, opponent),
        PieceKind::Rook => rook_fields(from, own, opponent),
        PieceKind::Queen => queen_fields(from, own, opponent),
        PieceKind::King => RayFields {
            attacked: king_attacked_fields(from, own),
            protected: king_protected_fields(from, own),
        },
    }
}

/// Squares the piece threatens: captures and king-safety relevant squares.
pub fn attacked_fields(piece: &Piece, own: SquareSet, opponent: SquareSet) -> SquareSet {
    fields(piece, own, opponent).attacked
}

/// Friendly-occupied squares the piece defends.
pub fn protected_fields(piece: &Piece, own: SquareSet, opponent: SquareSet) -> SquareSet {
    fields(piece, own, opponent).protected
}

/// Pseudo-legal destinations before the king-safety filter and before
/// castling and en passant are added.
pub fn possible_fields(piece: &Piece, own: SquareSet, opponent: SquareSet) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_possible_fields(piece.color, piece.position, own, opponent),
        _ => attacked_fields(piece, own, opponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, Coord};

    #[test]
    fn possible_equals_attacked_for_everything_but_pawns() {
        let own = SquareSet::single(Coord::new(4, 4));
        for kind in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen, PieceKind::King] {
            let piece = Piece::new(kind, Color::White, Coord::new(4, 4));
            assert_eq!(
                possible_fields(&piece, own, SquareSet::EMPTY),
                attacked_fields(&piece, own, SquareSet::EMPTY),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn pawn_accessors_diverge() {
        let piece = Piece::new(PieceKind::Pawn, Color::Black, Coord::new(1, 4));
        let own = SquareSet::single(piece.position);
        let attacked = attacked_fields(&piece, own, SquareSet::EMPTY);
        let possible = possible_fields(&piece, own, SquareSet::EMPTY);
        assert!(attacked.intersection(possible).is_empty());
        assert_eq!(possible.len(), 2);
        assert_eq!(attacked.len(), 2);
    }
}
