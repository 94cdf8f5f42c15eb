//! Index-addressable 8x8 board.
//!
//! The board is the working surface for move generation, legality
//! simulation and search. The match rebuilds it from both sides' piece lists
//! and keeps the two in step after every ply. `make_move`/`unmake_move` only
//! touch the cells a move affects, so simulation never clones the grid.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{lane_for_king_destination, KING_HOME_COL, STARTING_PLACEMENT};
use crate::game_state::chess_types::{Color, Coord, PieceKind, SquareSet};
use crate::game_state::piece::Piece;
use crate::game_state::undo_state::UndoState;
use crate::moves::move_descriptions::{Move, MoveKind};
use crate::utils::render_game_state::render_board;

pub type PieceCodes = [[i8; 8]; 8];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    pub fn standard() -> Self {
        let mut board = Self::empty();
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (col, kind) in back_row.iter().enumerate() {
                let col = col as i8;
                board.place(Piece::new(*kind, color, Coord::new(color.back_row(), col)));
                board.place(Piece::new(
                    PieceKind::Pawn,
                    color,
                    Coord::new(color.pawn_start_row(), col),
                ));
            }
        }
        board
    }

    /// Build a board from a FEN piece-placement field, row 0 first.
    pub fn from_placement(placement: &str) -> ChessResult<Self> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidPlacement(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let row = row as i8;
            let mut col = 0i8;
            for ch in text.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if i32::from(col) + skip as i32 > 8 {
                        return Err(ChessError::InvalidPlacement(format!(
                            "row {row} is wider than 8 squares"
                        )));
                    }
                    col += skip as i8;
                    continue;
                }
                if col >= 8 {
                    return Err(ChessError::InvalidPlacement(format!(
                        "row {row} is wider than 8 squares"
                    )));
                }
                let (color, kind) = PieceKind::decode_letter(ch)?;
                let position = Coord::new(row, col);
                let mut piece = Piece::new(kind, color, position);
                piece.has_moved = !starts_unmoved(kind, color, position);
                board.place(piece);
                col += 1;
            }
            if col != 8 {
                return Err(ChessError::InvalidPlacement(format!(
                    "row {row} covers {col} squares"
                )));
            }
        }
        Ok(board)
    }

    pub fn from_pieces<'a, I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = &'a Piece>,
    {
        let mut board = Self::empty();
        for piece in pieces {
            board.place(*piece);
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.cells[coord.row as usize][coord.col as usize].as_ref()
    }

    #[inline]
    pub fn piece_at_mut(&mut self, coord: Coord) -> Option<&mut Piece> {
        self.cells[coord.row as usize][coord.col as usize].as_mut()
    }

    #[inline]
    fn cell(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.row as usize][coord.col as usize]
    }

    #[inline]
    fn set_cell(&mut self, coord: Coord, piece: Option<Piece>) {
        self.cells[coord.row as usize][coord.col as usize] = piece;
    }

    /// Put `piece` on its own `position`, replacing whatever was there.
    #[inline]
    pub fn place(&mut self, piece: Piece) {
        self.set_cell(piece.position, Some(piece));
    }

    #[inline]
    pub fn take(&mut self, coord: Coord) -> Option<Piece> {
        self.cells[coord.row as usize][coord.col as usize].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn occupancy(&self, color: Color) -> SquareSet {
        self.pieces_of(color).map(|p| p.position).collect()
    }

    pub fn king(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    /// Sum of non-king material for `color`.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces_of(color)
            .filter(|p| p.kind != PieceKind::King)
            .map(Piece::value)
            .sum()
    }

    pub fn piece_codes(&self) -> PieceCodes {
        let mut codes = [[0i8; 8]; 8];
        for piece in self.pieces() {
            codes[piece.position.row as usize][piece.position.col as usize] = piece.code();
        }
        codes
    }

    /// Execute `mv`, returning the record needed to take it back.
    ///
    /// Every piece's en-passant flag is cleared first; a two-square pawn
    /// advance then sets it again on the moved pawn.
    pub fn make_move(&mut self, mv: &Move) -> ChessResult<UndoState> {
        let moving = self.cell(mv.from).ok_or(ChessError::EmptySquare(mv.from))?;
        if let Some(kind) = mv.promotion.filter(|kind| !kind.is_promotion_target()) {
            return Err(ChessError::InvalidPromotion(kind));
        }
        let mut undo = UndoState::new(*mv);

        let flagged: Vec<Coord> = self
            .pieces()
            .filter(|p| p.is_en_passant)
            .map(|p| p.position)
            .collect();
        for coord in flagged {
            undo.save(coord, self.cell(coord));
            if let Some(piece) = self.piece_at_mut(coord) {
                piece.is_en_passant = false;
            }
        }

        // Re-read after the flag reset so the saved copy is exact.
        let mut moved = self.cell(mv.from).unwrap_or(moving);
        undo.save(mv.from, Some(moved));
        self.set_cell(mv.from, None);

        moved.position = mv.to;
        moved.has_moved = true;

        match mv.kind {
            MoveKind::Normal => {
                moved.is_en_passant =
                    moved.kind == PieceKind::Pawn && (mv.to.row - mv.from.row).abs() == 2;
                undo.save(mv.to, self.cell(mv.to));
                self.place(moved);
            }
            MoveKind::Castle => {
                undo.save(mv.to, self.cell(mv.to));
                self.place(moved);
                if let Some(lane) = lane_for_king_destination(mv.to.col) {
                    let rook_from = Coord::new(mv.from.row, lane.rook_from_col);
                    let rook_to = Coord::new(mv.from.row, lane.rook_to_col);
                    undo.save(rook_from, self.cell(rook_from));
                    undo.save(rook_to, self.cell(rook_to));
                    if let Some(mut rook) = self.take(rook_from) {
                        rook.position = rook_to;
                        rook.has_moved = true;
                        self.place(rook);
                    }
                }
            }
            MoveKind::EnPassant => {
                let victim = Coord::new(mv.from.row, mv.to.col);
                undo.save(victim, self.cell(victim));
                self.set_cell(victim, None);
                undo.save(mv.to, self.cell(mv.to));
                self.place(moved);
            }
            MoveKind::Promotion => {
                let kind = mv.promotion.unwrap_or(PieceKind::Queen);
                undo.save(mv.to, self.cell(mv.to));
                self.place(moved.promoted(kind, mv.to));
            }
        }

        Ok(undo)
    }

    pub fn unmake_move(&mut self, undo: UndoState) {
        for (coord, previous) in undo.saved_cells.into_iter().rev() {
            self.set_cell(coord, previous);
        }
    }
}

fn starts_unmoved(kind: PieceKind, color: Color, position: Coord) -> bool {
    match kind {
        PieceKind::Pawn => position.row == color.pawn_start_row(),
        PieceKind::King => position == Coord::new(color.back_row(), KING_HOME_COL),
        PieceKind::Rook => {
            position.row == color.back_row() && (position.col == 0 || position.col == 7)
        }
        _ => position.row == color.back_row(),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_board(self))
    }
}
