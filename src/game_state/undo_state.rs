use crate::game_state::chess_types::Coord;
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::Move;

/// Single undo record for `Board::make_move` / `Board::unmake_move`.
///
/// Holds the prior contents of every cell the move touched, in the order
/// they were first written; unmake restores them in reverse.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub saved_cells: Vec<(Coord, Option<Piece>)>,
}

impl UndoState {
    #[inline]
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            saved_cells: Vec::with_capacity(6),
        }
    }

    #[inline]
    pub fn save(&mut self, coord: Coord, previous: Option<Piece>) {
        self.saved_cells.push((coord, previous));
    }
}
