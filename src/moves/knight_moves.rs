//! Knight field generation.
//!
//! The eight jump targets of every square are precomputed at compile time and
//! already clipped to the board; occupancy only decides whether a target is
//! attacked (empty or enemy) or protected (own piece).

use crate::game_state::chess_types::{Coord, SquareSet};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KNIGHT_REACH: [u64; 64] = generate_knight_reach();

#[inline]
pub const fn knight_reach(from: Coord) -> SquareSet {
    SquareSet(KNIGHT_REACH[from.index()])
}

#[inline]
pub const fn knight_attacked_fields(from: Coord, own: SquareSet) -> SquareSet {
    knight_reach(from).difference(own)
}

#[inline]
pub const fn knight_protected_fields(from: Coord, own: SquareSet) -> SquareSet {
    knight_reach(from).intersection(own)
}

const fn generate_knight_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut reach = 0u64;
        let mut i = 0usize;
        while i < KNIGHT_OFFSETS.len() {
            let (d_row, d_col) = KNIGHT_OFFSETS[i];
            reach |= bit_if_on_board(row + d_row, col + d_col);
            i += 1;
        }
        table[sq] = reach;
        sq += 1;
    }

    table
}

pub(crate) const fn bit_if_on_board(row: i8, col: i8) -> u64 {
    if !Coord::in_bounds(row, col) {
        return 0;
    }
    1u64 << ((row as usize) * 8 + col as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_reach_matches_clipped_offsets_everywhere() {
        for index in 0..64 {
            let from = Coord::from_index(index);
            let expected: SquareSet = KNIGHT_OFFSETS
                .iter()
                .map(|(d_row, d_col)| (from.row + d_row, from.col + d_col))
                .filter(|(row, col)| Coord::in_bounds(*row, *col))
                .map(|(row, col)| Coord::new(row, col))
                .collect();
            assert_eq!(knight_reach(from), expected, "knight on {from}");
            assert_eq!(knight_attacked_fields(from, SquareSet::single(from)), expected);
        }
    }

    #[test]
    fn knight_in_center_reaches_eight_squares() {
        assert_eq!(knight_reach(Coord::new(3, 3)).len(), 8);
    }

    #[test]
    fn knight_in_corner_is_clipped_to_two_squares() {
        let reach = knight_reach(Coord::new(7, 7));
        assert_eq!(
            reach.to_vec(),
            vec![Coord::new(5, 6), Coord::new(6, 5)]
        );
    }

    #[test]
    fn own_pieces_move_from_attacked_to_protected() {
        let from = Coord::new(7, 6);
        let own = SquareSet::single(Coord::new(6, 4));
        let attacked = knight_attacked_fields(from, own);
        let protected = knight_protected_fields(from, own);
        assert!(!attacked.contains(Coord::new(6, 4)));
        assert!(protected.contains(Coord::new(6, 4)));
        assert!(attacked.contains(Coord::new(5, 5)));
        assert!(attacked.contains(Coord::new(5, 7)));
    }
}
