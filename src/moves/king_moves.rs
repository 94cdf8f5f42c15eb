//! King field generation.
//!
//! Adjacent squares only; castling destinations are added by the
//! special-move resolver and king safety by the legality filter.

use crate::game_state::chess_types::{Coord, SquareSet};
use crate::moves::knight_moves::bit_if_on_board;

pub const KING_REACH: [u64; 64] = generate_king_reach();

#[inline]
pub const fn king_reach(from: Coord) -> SquareSet {
    SquareSet(KING_REACH[from.index()])
}

#[inline]
pub const fn king_attacked_fields(from: Coord, own: SquareSet) -> SquareSet {
    king_reach(from).difference(own)
}

#[inline]
pub const fn king_protected_fields(from: Coord, own: SquareSet) -> SquareSet {
    king_reach(from).intersection(own)
}

const fn generate_king_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut reach = 0u64;

        reach |= bit_if_on_board(row - 1, col - 1);
        reach |= bit_if_on_board(row - 1, col);
        reach |= bit_if_on_board(row - 1, col + 1);
        reach |= bit_if_on_board(row, col - 1);
        reach |= bit_if_on_board(row, col + 1);
        reach |= bit_if_on_board(row + 1, col - 1);
        reach |= bit_if_on_board(row + 1, col);
        reach |= bit_if_on_board(row + 1, col + 1);

        table[sq] = reach;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_reach_matches_clipped_neighbourhood_everywhere() {
        for index in 0..64 {
            let from = Coord::from_index(index);
            let rows = (from.row - 1).max(0)..=(from.row + 1).min(7);
            let cols = (from.col - 1).max(0)..=(from.col + 1).min(7);
            let expected = (rows.count() * cols.count()) - 1;
            assert_eq!(king_reach(from).len(), expected, "king on {from}");
        }
    }

    #[test]
    fn king_in_corner_has_three_squares() {
        assert_eq!(king_reach(Coord::new(0, 0)).len(), 3);
    }
}
