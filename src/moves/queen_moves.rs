//! Queen field generation: rook and bishop rays combined.

use crate::game_state::chess_types::{Coord, SquareSet};
use crate::moves::sliding::{trace_ray, RayFields, DIAGONAL_STEPS, ORTHOGONAL_STEPS};

pub fn queen_fields(from: Coord, own: SquareSet, opponent: SquareSet) -> RayFields {
    let mut fields = RayFields::default();
    for step in ORTHOGONAL_STEPS.iter().chain(DIAGONAL_STEPS.iter()) {
        trace_ray(from, *step, own, opponent, &mut fields);
    }
    fields
}
