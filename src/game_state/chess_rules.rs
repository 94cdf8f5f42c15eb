//! Canonical chess-rule constants.
//!
//! Starting layout in FEN piece-placement form (row 0 first) and the fixed
//! castling geometry shared by move generation and move application.

/// Standard starting position, piece-placement field only.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

pub const KING_HOME_COL: i8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub rook_from_col: i8,
    pub rook_to_col: i8,
    pub king_to_col: i8,
    /// Squares that must be empty, rook excluded.
    pub between_cols: &'static [i8],
    /// Squares the king crosses or lands on; none may be attacked.
    pub path_cols: &'static [i8],
}

pub const KINGSIDE: CastlingLane = CastlingLane {
    rook_from_col: 7,
    rook_to_col: 5,
    king_to_col: 6,
    between_cols: &[5, 6],
    path_cols: &[5, 6],
};

pub const QUEENSIDE: CastlingLane = CastlingLane {
    rook_from_col: 0,
    rook_to_col: 3,
    king_to_col: 2,
    between_cols: &[1, 2, 3],
    path_cols: &[3, 2],
};

pub const CASTLING_LANES: [CastlingLane; 2] = [KINGSIDE, QUEENSIDE];

/// Lane whose king destination is `king_to_col`.
pub fn lane_for_king_destination(king_to_col: i8) -> Option<CastlingLane> {
    CASTLING_LANES
        .iter()
        .copied()
        .find(|lane| lane.king_to_col == king_to_col)
}
