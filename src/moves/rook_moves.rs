//! Rook field generation along the four orthogonal rays.

use crate::game_state::chess_types::{Coord, SquareSet};
use crate::moves::sliding::{trace_rays, RayFields, ORTHOGONAL_STEPS};

#[inline]
pub fn rook_fields(from: Coord, own: SquareSet, opponent: SquareSet) -> RayFields {
    trace_rays(from, &ORTHOGONAL_STEPS, own, opponent)
}

/// Same row or same column, excluding `from`.
pub fn empty_board_rook_fields(from: Coord) -> SquareSet {
    (0..64)
        .map(Coord::from_index)
        .filter(|c| *c != from && (c.row == from.row || c.col == from.col))
        .collect()
}
