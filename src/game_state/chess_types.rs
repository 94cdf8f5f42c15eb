//! Core value types shared by every subsystem: sides, piece kinds, board
//! coordinates and the 64-bit square set used for attack maps.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};

pub const BOARD_SIZE: i8 = 8;

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a forward pawn move.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind (color is carried separately on the piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value. The king's 100 only marks occupancy on the wire.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Signed board code: magnitude is the value, sign is the side.
    #[inline]
    pub const fn code(self, color: Color) -> i8 {
        let magnitude = self.value() as i8;
        match color {
            Color::White => magnitude,
            Color::Black => -magnitude,
        }
    }

    /// Decode a signed board code. Knight and Bishop share magnitude 3, so
    /// code 3 decodes as Knight; callers needing bishops use `decode_letter`.
    pub fn from_code(code: i8) -> ChessResult<Option<(Color, PieceKind)>> {
        if code == 0 {
            return Ok(None);
        }
        let color = if code > 0 { Color::White } else { Color::Black };
        let kind = match code.unsigned_abs() {
            1 => PieceKind::Pawn,
            3 => PieceKind::Knight,
            5 => PieceKind::Rook,
            9 => PieceKind::Queen,
            100 => PieceKind::King,
            _ => return Err(ChessError::UnknownPieceCode(code)),
        };
        Ok(Some((color, kind)))
    }

    pub fn decode_letter(letter: char) -> ChessResult<(Color, PieceKind)> {
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match letter.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => {
                return Err(ChessError::InvalidPlacement(format!(
                    "unknown piece letter '{letter}'"
                )))
            }
        };
        Ok((color, kind))
    }

    pub const fn letter(self, color: Color) -> char {
        let lower = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => lower.to_ascii_uppercase(),
            Color::Black => lower,
        }
    }
}

/// Board coordinate. Row 0 is Black's back rank, row 7 is White's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    pub fn try_new(row: i8, col: i8) -> ChessResult<Self> {
        if Self::in_bounds(row, col) {
            Ok(Self { row, col })
        } else {
            Err(ChessError::OutOfBounds { row, col })
        }
    }

    #[inline]
    pub const fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE
    }

    /// Offset by `(d_row, d_col)`, `None` when it falls off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row + d_row;
        let col = self.col + d_col;
        if Self::in_bounds(row, col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 8) as i8,
            col: (index % 8) as i8,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col as u8);
        write!(f, "{}{}", file, 8 - self.row)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Self {
        Coord::new(row, col)
    }
}

/// Set of squares packed into a `u64`, bit `row * 8 + col`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn single(coord: Coord) -> Self {
        SquareSet(1u64 << coord.index())
    }

    #[inline]
    pub const fn contains(self, coord: Coord) -> bool {
        self.0 & (1u64 << coord.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, coord: Coord) {
        self.0 |= 1u64 << coord.index();
    }

    #[inline]
    pub fn remove(&mut self, coord: Coord) {
        self.0 &= !(1u64 << coord.index());
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn union(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & !other.0)
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }

    pub fn to_vec(self) -> Vec<Coord> {
        self.iter().collect()
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Coord;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates squares in ascending `row * 8 + col` order.
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Coord::from_index(index))
    }
}
