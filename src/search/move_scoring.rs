//! Static evaluation shared by the greedy and minimax strategies.
//!
//! Scores are centipawn-like and always from `perspective`'s point of view:
//! material difference, a check bonus, pawn advancement and a small
//! central-file bonus. The terms are symmetric so the score of one side is
//! the negation of the other's.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::move_descriptions::Move;

pub const MATE_SCORE: i32 = 30000;
pub const MATERIAL_SCALE: i32 = 100;
pub const CHECK_BONUS: i32 = 50;
pub const PAWN_ADVANCE_BONUS: i32 = 5;

#[inline]
fn central_file_bonus(col: i8) -> i32 {
    match col {
        3 | 4 => 6,
        2 | 5 => 3,
        _ => 0,
    }
}

fn piece_terms(piece: &Piece) -> i32 {
    let mut score = 0;
    if piece.kind != PieceKind::King {
        score += piece.value() * MATERIAL_SCALE;
        score += central_file_bonus(piece.position.col);
    }
    if piece.kind == PieceKind::Pawn {
        let advanced = (piece.position.row - piece.color.pawn_start_row()).abs() as i32;
        score += advanced * PAWN_ADVANCE_BONUS;
    }
    score
}

/// Evaluate `board` for `perspective`.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let mut score = board.pieces().fold(0, |acc, piece| {
        let terms = piece_terms(piece);
        if piece.color == perspective {
            acc + terms
        } else {
            acc - terms
        }
    });

    if is_king_in_check(board, perspective.opposite()) {
        score += CHECK_BONUS;
    }
    if is_king_in_check(board, perspective) {
        score -= CHECK_BONUS;
    }
    score
}

/// Evaluate the position after `mv` for the mover, leaving `board` as found.
pub fn score_move(board: &mut Board, mv: &Move) -> ChessResult<i32> {
    let mover = board
        .piece_at(mv.from)
        .map(|p| p.color)
        .ok_or(ChessError::EmptySquare(mv.from))?;
    let undo = board.make_move(mv)?;
    let score = evaluate(board, mover);
    board.unmake_move(undo);
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Coord;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::standard();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        let board = Board::from_placement("4k3/8/8/3q4/4P3/8/8/3RK3").expect("parses");
        assert_eq!(
            evaluate(&board, Color::White),
            -evaluate(&board, Color::Black)
        );
    }

    #[test]
    fn pawn_push_scores_advance_and_centre() {
        let mut board = Board::standard();
        let base = evaluate(&board, Color::White);
        let score = score_move(
            &mut board,
            &Move::normal(Coord::new(6, 4), Coord::new(4, 4), None),
        )
        .expect("scores");
        assert_eq!(score - base, 2 * PAWN_ADVANCE_BONUS);
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn checking_move_earns_bonus() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3").expect("parses");
        let quiet = score_move(
            &mut board,
            &Move::normal(Coord::new(7, 0), Coord::new(6, 0), None),
        )
        .expect("scores");
        let check = score_move(
            &mut board,
            &Move::normal(Coord::new(7, 0), Coord::new(0, 0), None),
        )
        .expect("scores");
        assert_eq!(check - quiet, CHECK_BONUS);
    }
}
