//! Errors used throughout the match engine.
//!
//! `ChessError` is the single error type returned by board setup, move
//! validation, history navigation and the strategies. Variants fall into
//! three groups:
//! - invalid user interaction (`EmptySquare`, `NotOwnPiece`, `ViewingHistory`,
//!   `NotHumanTurn`, `GameOver`): recoverable, reported to the presentation
//!   layer and the state is left untouched;
//! - illegal move construction (`IllegalMove`): rejected before any mutation;
//! - invariant violations (`UnknownPieceCode`, `InvalidPromotion`,
//!   `MissingKing`, `InvalidPlacement`): fatal for the operation that hit them.

use crate::game_state::chess_types::{Color, Coord, PieceKind};
use crate::game_state::termination::GameResult;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i8, col: i8 },

    #[error("there is no piece on {0}")]
    EmptySquare(Coord),

    #[error("the piece on {square} does not belong to {side}")]
    NotOwnPiece { square: Coord, side: Color },

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error("no piece is selected")]
    NothingSelected,

    #[error("{0} is played by a strategy, not by clicks")]
    NotHumanTurn(Color),

    #[error("moves are rejected while viewing position {index} of {total}")]
    ViewingHistory { index: usize, total: usize },

    #[error("no {0} position to load")]
    NoHistory(&'static str),

    #[error("the game is already over ({0})")]
    GameOver(GameResult),

    #[error("unknown piece code {0}")]
    UnknownPieceCode(i8),

    #[error("{0:?} is not a valid promotion piece")]
    InvalidPromotion(PieceKind),

    #[error("{0} has no king on the board")]
    MissingKing(Color),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid square notation: {0}")]
    InvalidNotation(String),
}
