//! Ray tracing shared by bishops, rooks and queens.

use crate::game_state::chess_types::{Coord, SquareSet};

pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_STEPS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Attacked and protected squares of one sliding piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayFields {
    pub attacked: SquareSet,
    pub protected: SquareSet,
}

/// Walk one ray up to seven steps. The first enemy square is attacked and
/// ends the ray; the first own square is protected and ends the ray.
pub fn trace_ray(
    from: Coord,
    (d_row, d_col): (i8, i8),
    own: SquareSet,
    opponent: SquareSet,
    fields: &mut RayFields,
) {
    let mut cursor = from;
    for _ in 0..7 {
        let Some(next) = cursor.offset(d_row, d_col) else {
            return;
        };
        if own.contains(next) {
            fields.protected.insert(next);
            return;
        }
        fields.attacked.insert(next);
        if opponent.contains(next) {
            return;
        }
        cursor = next;
    }
}

pub fn trace_rays(
    from: Coord,
    steps: &[(i8, i8)],
    own: SquareSet,
    opponent: SquareSet,
) -> RayFields {
    let mut fields = RayFields::default();
    for step in steps {
        trace_ray(from, *step, own, opponent, &mut fields);
    }
    fields
}
