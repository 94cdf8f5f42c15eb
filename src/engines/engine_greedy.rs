//! One-ply greedy strategy.
//!
//! Scores every legal move with `move_scoring::score_move` and keeps the
//! first move reaching the best score, so ties go to the earliest move in
//! generation order.

use tracing::trace;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{MatchView, Strategy};
use crate::game_state::chess_types::Coord;
use crate::move_generation::legal_move_generator::legal_moves_in_place;
use crate::search::move_scoring::score_move;

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn choose_move(&mut self, view: &MatchView<'_>) -> ChessResult<Option<(Coord, Coord)>> {
        let mut scratch = view.board.clone();
        let legal = legal_moves_in_place(&mut scratch, view.color())?;

        let mut best: Option<((Coord, Coord), i32)> = None;
        for mv in &legal {
            let score = score_move(&mut scratch, mv)?;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some(((mv.from, mv.to), score)),
            }
        }

        trace!(
            side = %view.color(),
            legal_moves = legal.len(),
            best_score = best.map(|(_, s)| s),
            "greedy strategy"
        );
        Ok(best.map(|(pair, _)| pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;
    use crate::game_state::side::Side;

    fn choose(placement: &str, color: Color) -> Option<(Coord, Coord)> {
        let board = Board::from_placement(placement).expect("parses");
        let mut to_move = Side::new("a", color);
        let mut opponent = Side::new("b", color.opposite());
        for side in [&mut to_move, &mut opponent] {
            side.sync_from_board(&board);
            side.refresh(&board).expect("refresh succeeds");
        }
        let view = MatchView {
            board: &board,
            to_move: &to_move,
            opponent: &opponent,
        };
        GreedyStrategy.choose_move(&view).expect("chooses")
    }

    #[test]
    fn takes_the_hanging_queen() {
        assert_eq!(
            choose("4k3/8/8/3q4/8/8/8/3RK3", Color::White),
            Some((Coord::new(7, 3), Coord::new(3, 3)))
        );
    }

    #[test]
    fn black_also_maximises_its_own_score() {
        assert_eq!(
            choose("3rk3/8/8/8/3Q4/8/8/4K3", Color::Black),
            Some((Coord::new(0, 3), Coord::new(4, 3)))
        );
    }

    #[test]
    fn stalemated_side_has_no_choice() {
        assert_eq!(choose("k7/2Q5/1K6/8/8/8/8/8", Color::Black), None);
    }
}
