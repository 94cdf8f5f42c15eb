use crate::game_state::chess_types::{Color, Coord, PieceKind};

/// A piece on the board. Identity is `(kind, color)`; the rest is state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Coord,
    pub has_moved: bool,
    /// Set on a pawn for the one ply after it advanced two squares.
    pub is_en_passant: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, position: Coord) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
            is_en_passant: false,
        }
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    #[inline]
    pub const fn code(&self) -> i8 {
        self.kind.code(self.color)
    }

    /// Fresh piece replacing a promoted pawn on its destination.
    #[inline]
    pub const fn promoted(&self, kind: PieceKind, to: Coord) -> Self {
        Self {
            kind,
            color: self.color,
            position: to,
            has_moved: true,
            is_en_passant: false,
        }
    }
}
