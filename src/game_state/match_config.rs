//! Match setup: who plays each side, the optional clock and the start
//! position.

use crate::engines::engine_greedy::GreedyStrategy;
use crate::engines::engine_minimax::MinimaxStrategy;
use crate::engines::engine_random::RandomStrategy;
use crate::engines::engine_trait::Strategy;
use crate::game_state::chess_types::Color;
use crate::game_state::clock::ClockSettings;
use crate::search::alpha_beta::SearchConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Random { seed: Option<u64> },
    Greedy,
    Minimax(SearchConfig),
}

impl PlayerKind {
    /// Strategy driving this player, `None` for humans.
    pub fn build_strategy(&self) -> Option<Box<dyn Strategy>> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Random { seed: Some(seed) } => Some(Box::new(RandomStrategy::seeded(*seed))),
            PlayerKind::Random { seed: None } => Some(Box::new(RandomStrategy::new())),
            PlayerKind::Greedy => Some(Box::new(GreedyStrategy::new())),
            PlayerKind::Minimax(config) => Some(Box::new(MinimaxStrategy::new(*config))),
        }
    }

    #[inline]
    pub fn is_human(&self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn strategy(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    pub clock: Option<ClockSettings>,
    /// Piece-placement field to start from instead of the standard setup.
    pub start_placement: Option<String>,
    pub first_to_move: Color,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            white: PlayerConfig::human("White"),
            black: PlayerConfig::human("Black"),
            clock: None,
            start_placement: None,
            first_to_move: Color::White,
        }
    }
}

impl MatchConfig {
    pub fn player(&self, color: Color) -> &PlayerConfig {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}
