//! One of the two players of a match.
//!
//! A side owns its piece list plus caches that are recomputed by pure
//! functions once per ply (`refresh`), never patched incrementally.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Coord, PieceKind, SquareSet};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_checks::{attacked_by, protected_by};
use crate::move_generation::legal_move_generator::legal_destinations_by_piece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub name: String,
    pub color: Color,
    /// Remaining clock time in seconds, when the match is timed.
    pub clock: Option<u32>,
    pub pieces: Vec<Piece>,
    pub selected: Option<Coord>,
    pub last_moved: Option<Coord>,
    pub last_move: Option<(Coord, Coord)>,
    coords: SquareSet,
    attacked: SquareSet,
    protected: SquareSet,
    possible: Vec<(Coord, SquareSet)>,
}

impl Side {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            clock: None,
            pieces: Vec::new(),
            selected: None,
            last_moved: None,
            last_move: None,
            coords: SquareSet::EMPTY,
            attacked: SquareSet::EMPTY,
            protected: SquareSet::EMPTY,
            possible: Vec::new(),
        }
    }

    /// Replace the piece list with this side's pieces on `board`.
    pub fn sync_from_board(&mut self, board: &Board) {
        self.pieces = board.pieces_of(self.color).copied().collect();
    }

    /// Recompute coordinate, attack, protection and legal-destination caches.
    pub fn refresh(&mut self, board: &Board) -> ChessResult<()> {
        self.coords = board.occupancy(self.color);
        self.attacked = attacked_by(board, self.color);
        self.protected = protected_by(board, self.color);
        self.possible = legal_destinations_by_piece(board, self.color)?;
        Ok(())
    }

    #[inline]
    pub fn coords(&self) -> SquareSet {
        self.coords
    }

    #[inline]
    pub fn attacked_fields(&self) -> SquareSet {
        self.attacked
    }

    #[inline]
    pub fn protected_fields(&self) -> SquareSet {
        self.protected
    }

    /// Legal destinations of the piece on `from`; empty for foreign squares.
    pub fn possible_fields(&self, from: Coord) -> SquareSet {
        self.possible
            .iter()
            .find(|(origin, _)| *origin == from)
            .map(|(_, destinations)| *destinations)
            .unwrap_or_default()
    }

    /// Pieces with at least one legal move, with their destinations.
    pub fn movable_pieces(&self) -> &[(Coord, SquareSet)] {
        &self.possible
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        !self.possible.is_empty()
    }

    pub fn king(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.kind == PieceKind::King)
    }

    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.position == coord)
    }

    pub fn is_king_only(&self) -> bool {
        self.pieces.iter().all(|p| p.kind == PieceKind::King)
    }

    /// Remaining non-king material.
    pub fn material(&self) -> i32 {
        self.pieces
            .iter()
            .filter(|p| p.kind != PieceKind::King)
            .map(Piece::value)
            .sum()
    }
}
