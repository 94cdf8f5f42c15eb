//! Bishop field generation along the four diagonal rays.

use crate::game_state::chess_types::{Coord, SquareSet};
use crate::moves::sliding::{trace_rays, RayFields, DIAGONAL_STEPS};

#[inline]
pub fn bishop_fields(from: Coord, own: SquareSet, opponent: SquareSet) -> RayFields {
    trace_rays(from, &DIAGONAL_STEPS, own, opponent)
}

/// Closed form for an empty board: squares sharing a diagonal with `from`.
pub fn empty_board_bishop_fields(from: Coord) -> SquareSet {
    (0..64)
        .map(Coord::from_index)
        .filter(|c| *c != from && (c.row - from.row).abs() == (c.col - from.col).abs())
        .collect()
}
