//! Attack maps and the king-safety legality filter.
//!
//! A candidate move is legal iff, after it is played on the board, the
//! mover's king is not in the opponent's freshly recomputed attack set. The
//! move is made and unmade in place; only the touched cells change.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Coord, SquareSet};
use crate::moves::move_descriptions::Move;
use crate::moves::piece_moves::{attacked_fields, protected_fields};

/// Union of every square `color` attacks on `board`.
pub fn attacked_by(board: &Board, color: Color) -> SquareSet {
    let own = board.occupancy(color);
    let opponent = board.occupancy(color.opposite());
    board
        .pieces_of(color)
        .fold(SquareSet::EMPTY, |acc, piece| {
            acc.union(attacked_fields(piece, own, opponent))
        })
}

/// Union of every own-occupied square `color` defends on `board`.
pub fn protected_by(board: &Board, color: Color) -> SquareSet {
    let own = board.occupancy(color);
    let opponent = board.occupancy(color.opposite());
    board
        .pieces_of(color)
        .fold(SquareSet::EMPTY, |acc, piece| {
            acc.union(protected_fields(piece, own, opponent))
        })
}

#[inline]
pub fn is_square_attacked(board: &Board, square: Coord, attacker: Color) -> bool {
    attacked_by(board, attacker).contains(square)
}

pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.king(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// Simulate `mv` and report whether the mover's king is safe afterwards.
///
/// The board is restored before returning, whatever the outcome.
pub fn leaves_king_safe(board: &mut Board, mv: &Move) -> ChessResult<bool> {
    let Some(mover) = board.piece_at(mv.from).map(|p| p.color) else {
        return Ok(false);
    };
    let undo = board.make_move(mv)?;
    let safe = !is_king_in_check(board, mover);
    board.unmake_move(undo);
    Ok(safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::piece::Piece;

    fn kings_only(white_king: Coord, black_king: Coord) -> Board {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::King, Color::White, white_king));
        board.place(Piece::new(PieceKind::King, Color::Black, black_king));
        board
    }

    #[test]
    fn start_position_attack_maps() {
        let board = Board::standard();
        let white = attacked_by(&board, Color::White);
        // Row 5 is fully covered by pawns, plus knight jumps onto it.
        for col in 0..8 {
            assert!(white.contains(Coord::new(5, col)));
        }
        assert!(!white.contains(Coord::new(4, 4)));
        assert!(!is_king_in_check(&board, Color::White));
        assert!(protected_by(&board, Color::Black).contains(Coord::new(1, 4)));
    }

    #[test]
    fn king_cannot_step_next_to_enemy_king() {
        let mut board = kings_only(Coord::new(4, 4), Coord::new(2, 4));
        let toward = Move::normal(Coord::new(4, 4), Coord::new(3, 4), None);
        let away = Move::normal(Coord::new(4, 4), Coord::new(5, 4), None);
        assert!(!leaves_king_safe(&mut board, &toward).expect("simulates"));
        assert!(leaves_king_safe(&mut board, &away).expect("simulates"));
        assert_eq!(board, kings_only(Coord::new(4, 4), Coord::new(2, 4)));
    }

    #[test]
    fn king_cannot_capture_protected_piece() {
        let mut board = Board::from_placement("8/8/8/3k4/8/3r4/3r4/3K4").expect("parses");
        let capture_defended = Move::normal(
            Coord::new(7, 3),
            Coord::new(6, 3),
            board.piece_at(Coord::new(6, 3)).copied(),
        );
        assert!(!leaves_king_safe(&mut board, &capture_defended).expect("simulates"));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").expect("parses");
        let off_line = Move::normal(Coord::new(6, 4), Coord::new(5, 3), None);
        assert!(!leaves_king_safe(&mut board, &off_line).expect("simulates"));
    }
}
