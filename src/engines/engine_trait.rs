//! Strategy abstraction for scripted players.
//!
//! A strategy looks at the match through a read-only `MatchView` and answers
//! with an origin/destination pair. The match validates and commits the move
//! itself, so a strategy can never leave the position half-changed.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Coord};
use crate::game_state::side::Side;

/// What a strategy may see while choosing a move.
#[derive(Debug, Clone, Copy)]
pub struct MatchView<'a> {
    pub board: &'a Board,
    pub to_move: &'a Side,
    pub opponent: &'a Side,
}

impl MatchView<'_> {
    #[inline]
    pub fn color(&self) -> Color {
        self.to_move.color
    }
}

pub trait Strategy: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// `None` when the side to move has no movable piece.
    fn choose_move(&mut self, view: &MatchView<'_>) -> ChessResult<Option<(Coord, Coord)>>;
}
