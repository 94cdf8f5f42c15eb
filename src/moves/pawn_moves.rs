//! Pawn field generation.
//!
//! Pawns are the one piece whose threatened squares differ from the squares
//! they can move to, so both are exposed: `pawn_attacked_fields` covers the
//! forward diagonals whether or not they are occupied (king safety), while
//! `pawn_possible_fields` covers pushes and captures onto enemy pieces.
//! En passant is resolved separately.

use crate::game_state::chess_types::{Color, Coord, SquareSet};

#[inline]
fn diagonals(color: Color, from: Coord) -> SquareSet {
    let forward = color.forward();
    [from.offset(forward, -1), from.offset(forward, 1)]
        .into_iter()
        .flatten()
        .collect()
}

pub fn pawn_attacked_fields(color: Color, from: Coord, own: SquareSet) -> SquareSet {
    diagonals(color, from).difference(own)
}

pub fn pawn_protected_fields(color: Color, from: Coord, own: SquareSet) -> SquareSet {
    diagonals(color, from).intersection(own)
}

pub fn pawn_possible_fields(
    color: Color,
    from: Coord,
    own: SquareSet,
    opponent: SquareSet,
) -> SquareSet {
    let occupied = own.union(opponent);
    let mut fields = diagonals(color, from).intersection(opponent);

    let forward = color.forward();
    if let Some(one_step) = from.offset(forward, 0) {
        if !occupied.contains(one_step) {
            fields.insert(one_step);
            if from.row == color.pawn_start_row() {
                if let Some(two_step) = one_step.offset(forward, 0) {
                    if !occupied.contains(two_step) {
                        fields.insert(two_step);
                    }
                }
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_pawn_on_start_row_pushes_one_or_two() {
        let from = Coord::new(6, 4);
        let fields = pawn_possible_fields(Color::White, from, SquareSet::single(from), SquareSet::EMPTY);
        assert_eq!(fields.to_vec(), vec![Coord::new(4, 4), Coord::new(5, 4)]);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let from = Coord::new(1, 3);
        let blocker = SquareSet::single(Coord::new(3, 3));
        let fields = pawn_possible_fields(Color::Black, from, SquareSet::single(from), blocker);
        assert_eq!(fields.to_vec(), vec![Coord::new(2, 3)]);

        let near_blocker = SquareSet::single(Coord::new(2, 3));
        let fields = pawn_possible_fields(Color::Black, from, SquareSet::single(from), near_blocker);
        assert!(fields.is_empty());
    }

    #[test]
    fn pawn_off_start_row_pushes_once() {
        let from = Coord::new(5, 0);
        let fields = pawn_possible_fields(Color::White, from, SquareSet::single(from), SquareSet::EMPTY);
        assert_eq!(fields.to_vec(), vec![Coord::new(4, 0)]);
    }

    #[test]
    fn empty_diagonals_are_attacked_but_not_possible() {
        let from = Coord::new(4, 4);
        let own = SquareSet::single(from);
        let attacked = pawn_attacked_fields(Color::White, from, own);
        assert_eq!(attacked.to_vec(), vec![Coord::new(3, 3), Coord::new(3, 5)]);

        let possible = pawn_possible_fields(Color::White, from, own, SquareSet::EMPTY);
        assert!(!possible.contains(Coord::new(3, 3)));
        assert!(!possible.contains(Coord::new(3, 5)));
    }

    #[test]
    fn diagonal_capture_only_onto_enemy() {
        let from = Coord::new(4, 4);
        let enemy = SquareSet::single(Coord::new(3, 5));
        let possible = pawn_possible_fields(Color::White, from, SquareSet::single(from), enemy);
        assert!(possible.contains(Coord::new(3, 5)));
        assert!(!possible.contains(Coord::new(3, 3)));
    }

    #[test]
    fn edge_pawn_has_one_diagonal() {
        let from = Coord::new(1, 0);
        let attacked = pawn_attacked_fields(Color::Black, from, SquareSet::single(from));
        assert_eq!(attacked.to_vec(), vec![Coord::new(2, 1)]);
    }
}
