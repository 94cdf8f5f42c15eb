//! Minimax strategy backed by `search::alpha_beta`.

use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{MatchView, Strategy};
use crate::game_state::chess_types::Coord;
use crate::search::alpha_beta::{search, SearchConfig, SearchResult};

#[derive(Debug, Clone, Default)]
pub struct MinimaxStrategy {
    config: SearchConfig,
    last_result: Option<SearchResult>,
}

impl MinimaxStrategy {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            last_result: None,
        }
    }

    pub fn with_depth(max_depth: u8) -> Self {
        Self::new(SearchConfig {
            max_depth,
            ..SearchConfig::default()
        })
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Statistics of the most recent search.
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }
}

impl Strategy for MinimaxStrategy {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.last_result = None;
    }

    fn choose_move(&mut self, view: &MatchView<'_>) -> ChessResult<Option<(Coord, Coord)>> {
        let result = search(view.board, view.color(), self.config)?;
        debug!(
            side = %view.color(),
            best = ?result.best_move.map(|mv| mv.to_string()),
            score = result.best_score,
            depth = result.reached_depth,
            "minimax strategy"
        );
        self.last_result = Some(result);
        Ok(result.best_move.map(|mv| (mv.from, mv.to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;
    use crate::game_state::side::Side;

    #[test]
    fn plays_mate_in_one_and_records_stats() {
        let board = Board::from_placement("6k1/5ppp/8/8/8/8/8/R5K1").expect("parses");
        let mut white = Side::new("w", Color::White);
        let mut black = Side::new("b", Color::Black);
        for side in [&mut white, &mut black] {
            side.sync_from_board(&board);
            side.refresh(&board).expect("refresh succeeds");
        }
        let view = MatchView {
            board: &board,
            to_move: &white,
            opponent: &black,
        };
        let mut strategy = MinimaxStrategy::with_depth(2);
        assert_eq!(
            strategy.choose_move(&view).expect("chooses"),
            Some((Coord::new(7, 0), Coord::new(0, 0)))
        );
        let stats = strategy.last_result().expect("searched");
        assert_eq!(stats.reached_depth, 2);
        assert!(stats.nodes > 1);
    }
}
