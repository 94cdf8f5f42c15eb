//! Transition descriptors for a single ply.

use std::fmt;

use crate::game_state::chess_types::{Color, Coord, PieceKind};
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
    Promotion,
}

/// One move as it will be executed. Lives only for the duration of a ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub kind: MoveKind,
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn normal(from: Coord, to: Coord, captured: Option<Piece>) -> Self {
        Self {
            kind: MoveKind::Normal,
            from,
            to,
            captured,
            promotion: None,
        }
    }

    #[inline]
    pub const fn castle(from: Coord, to: Coord) -> Self {
        Self {
            kind: MoveKind::Castle,
            from,
            to,
            captured: None,
            promotion: None,
        }
    }

    #[inline]
    pub const fn en_passant(from: Coord, to: Coord, captured: Piece) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            from,
            to,
            captured: Some(captured),
            promotion: None,
        }
    }

    #[inline]
    pub const fn promotion(
        from: Coord,
        to: Coord,
        captured: Option<Piece>,
        promotion: PieceKind,
    ) -> Self {
        Self {
            kind: MoveKind::Promotion,
            from,
            to,
            captured,
            promotion: Some(promotion),
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Same move with a different promotion piece.
    #[inline]
    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter(Color::Black))?;
        }
        Ok(())
    }
}
