//! Random-move strategy.
//!
//! Picks a movable piece uniformly, then one of its legal destinations
//! uniformly. Mostly useful for diagnostics and scripted test games.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{MatchView, Strategy};
use crate::game_state::chess_types::Coord;

pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, view: &MatchView<'_>) -> ChessResult<Option<(Coord, Coord)>> {
        let Some((from, destinations)) = view.to_move.movable_pieces().choose(&mut self.rng)
        else {
            return Ok(None);
        };
        let destinations = destinations.to_vec();
        let picked = destinations.choose(&mut self.rng).map(|to| (*from, *to));
        trace!(
            side = %view.color(),
            movable = view.to_move.movable_pieces().len(),
            ?picked,
            "random strategy"
        );
        Ok(picked)
    }
}
