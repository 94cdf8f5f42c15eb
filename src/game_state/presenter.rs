//! Callback boundary towards whatever draws the match.
//!
//! The match pushes a full refresh through `Presenter` after every state
//! change. All methods default to no-ops so a front end only implements what
//! it displays. Human promotions are resolved through `PromotionChooser`.

use crate::game_state::board::PieceCodes;
use crate::game_state::chess_types::{Color, Coord, PieceKind, SquareSet};
use crate::game_state::termination::GameResult;

/// Squares a front end should emphasise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlights {
    pub selected: Option<Coord>,
    pub destinations: SquareSet,
    pub last_move: Option<(Coord, Coord)>,
    pub checked_king: Option<Coord>,
}

pub trait Presenter {
    fn render_pieces(&mut self, _codes: &PieceCodes) {}
    fn render_highlights(&mut self, _highlights: &Highlights) {}
    fn render_scores(&mut self, _white: i32, _black: i32) {}
    fn render_clock(&mut self, _seconds_remaining: u32, _side: Color) {}
    fn render_history_position(&mut self, _index: usize, _total: usize) {}
    fn on_game_over(&mut self, _result: GameResult) {}
    /// Non-fatal message, e.g. a rejected click.
    fn report_message(&mut self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

pub trait PromotionChooser {
    /// Blocking request for the piece a human pawn promotes to.
    fn request_promotion_choice(&mut self, side: Color) -> PieceKind;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysQueen;

impl PromotionChooser for AlwaysQueen {
    fn request_promotion_choice(&mut self, _side: Color) -> PieceKind {
        PieceKind::Queen
    }
}

/// Chooser that always answers with a fixed piece kind.
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub PieceKind);

impl PromotionChooser for FixedChoice {
    fn request_promotion_choice(&mut self, _side: Color) -> PieceKind {
        self.0
    }
}
