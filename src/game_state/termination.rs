//! Game results and the end-of-ply termination checks.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::side::Side;
use crate::move_generation::legal_move_checks::is_king_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWinsCheckmate,
    BlackWinsCheckmate,
    WhiteWinsTimeout,
    BlackWinsTimeout,
    DrawStalemate,
    DrawInsufficientMaterial,
    DrawThreefoldRepetition,
}

impl GameResult {
    pub const fn checkmate_by(winner: Color) -> Self {
        match winner {
            Color::White => GameResult::WhiteWinsCheckmate,
            Color::Black => GameResult::BlackWinsCheckmate,
        }
    }

    /// Result when `flagged` runs out of time.
    pub const fn timeout_of(flagged: Color) -> Self {
        match flagged {
            Color::White => GameResult::BlackWinsTimeout,
            Color::Black => GameResult::WhiteWinsTimeout,
        }
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWinsCheckmate | GameResult::WhiteWinsTimeout => Some(Color::White),
            GameResult::BlackWinsCheckmate | GameResult::BlackWinsTimeout => Some(Color::Black),
            _ => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::WhiteWinsCheckmate => "White wins by checkmate",
            GameResult::BlackWinsCheckmate => "Black wins by checkmate",
            GameResult::WhiteWinsTimeout => "White wins on time",
            GameResult::BlackWinsTimeout => "Black wins on time",
            GameResult::DrawStalemate => "draw by stalemate",
            GameResult::DrawInsufficientMaterial => "draw by insufficient material",
            GameResult::DrawThreefoldRepetition => "draw by threefold repetition",
        };
        f.write_str(text)
    }
}

/// Run the end-of-ply checks for the side now to move, in fixed order:
/// bare kings, then no legal moves (mate or stalemate), then repetition.
pub fn evaluate_termination(
    board: &Board,
    to_move: &Side,
    opponent: &Side,
    threefold_repetition: bool,
) -> Option<GameResult> {
    if to_move.is_king_only() && opponent.is_king_only() {
        return Some(GameResult::DrawInsufficientMaterial);
    }
    if !to_move.can_move() {
        return Some(if is_king_in_check(board, to_move.color) {
            GameResult::checkmate_by(opponent.color)
        } else {
            GameResult::DrawStalemate
        });
    }
    if threefold_repetition {
        return Some(GameResult::DrawThreefoldRepetition);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides(board: &Board, to_move: Color) -> (Side, Side) {
        let mut a = Side::new("a", to_move);
        let mut b = Side::new("b", to_move.opposite());
        for side in [&mut a, &mut b] {
            side.sync_from_board(board);
            side.refresh(board).expect("refresh succeeds");
        }
        (a, b)
    }

    #[test]
    fn bare_kings_draw_first() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3").expect("parses");
        let (to_move, opponent) = sides(&board, Color::White);
        assert_eq!(
            evaluate_termination(&board, &to_move, &opponent, true),
            Some(GameResult::DrawInsufficientMaterial)
        );
    }

    #[test]
    fn stalemate_without_check() {
        let board = Board::from_placement("k7/2Q5/1K6/8/8/8/8/8").expect("parses");
        let (to_move, opponent) = sides(&board, Color::Black);
        assert_eq!(
            evaluate_termination(&board, &to_move, &opponent, false),
            Some(GameResult::DrawStalemate)
        );
    }

    #[test]
    fn checkmate_names_the_other_side() {
        let board = Board::from_placement("3R2k1/5ppp/8/8/8/8/8/6K1").expect("parses");
        let (to_move, opponent) = sides(&board, Color::Black);
        assert_eq!(
            evaluate_termination(&board, &to_move, &opponent, false),
            Some(GameResult::WhiteWinsCheckmate)
        );
    }

    #[test]
    fn repetition_is_checked_last() {
        let board = Board::standard();
        let (to_move, opponent) = sides(&board, Color::White);
        assert_eq!(evaluate_termination(&board, &to_move, &opponent, false), None);
        assert_eq!(
            evaluate_termination(&board, &to_move, &opponent, true),
            Some(GameResult::DrawThreefoldRepetition)
        );
    }

    #[test]
    fn timeout_and_winner_helpers() {
        assert_eq!(GameResult::timeout_of(Color::White), GameResult::BlackWinsTimeout);
        assert_eq!(GameResult::WhiteWinsTimeout.winner(), Some(Color::White));
        assert!(GameResult::DrawStalemate.is_draw());
    }
}
