//! Head-to-head strategy matches without a presentation layer.
//!
//! Runs two `Strategy` implementations through a `ChessMatch` until the game
//! ends or a ply cap is hit, and aggregates results over a series.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::Strategy;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::match_config::{MatchConfig, PlayerConfig};
use crate::game_state::match_controller::ChessMatch;
use crate::game_state::termination::GameResult;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Finished(GameResult),
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::Finished(result) => result.winner(),
            MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub max_plies: u32,
    pub start_placement: Option<String>,
    pub first_to_move: Color,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            start_placement: None,
            first_to_move: Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: HarnessConfig,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: HarnessConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    /// Winning player (if any) and outcome of each game.
    pub outcomes: Vec<(Option<PlayerId>, MatchOutcome)>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl SeriesStats {
    pub fn player1_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player1_total_time_ns, self.player1_moves)
    }

    pub fn player2_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player2_total_time_ns, self.player2_moves)
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms(),
            self.player2_avg_move_time_ms()
        )
    }
}

/// Play one game, `white` against `black`.
pub fn play_match(
    white: Box<dyn Strategy>,
    black: Box<dyn Strategy>,
    config: &HarnessConfig,
) -> ChessResult<MatchRecord> {
    let started_at = Utc::now();
    let mut game = ChessMatch::new(MatchConfig {
        white: PlayerConfig::human(white.name()),
        black: PlayerConfig::human(black.name()),
        clock: None,
        start_placement: config.start_placement.clone(),
        first_to_move: config.first_to_move,
    })?;
    game.set_strategy(Color::White, Some(white));
    game.set_strategy(Color::Black, Some(black));
    game.start()?;

    let mut played_moves_lan = Vec::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    while !game.is_game_over() && game.ply_count() < config.max_plies {
        let mover = game.to_move();
        let started = Instant::now();
        let played = game.step()?;
        let elapsed_ns = started.elapsed().as_nanos();

        let Some(mv) = played else {
            continue;
        };
        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }
        played_moves_lan.push(move_to_long_algebraic(&mv));
    }

    let outcome = game
        .result()
        .map(MatchOutcome::Finished)
        .unwrap_or(MatchOutcome::DrawMaxPlies);
    info!(
        white = game.player_name(Color::White),
        black = game.player_name(Color::Black),
        ?outcome,
        plies = game.ply_count(),
        "harness match finished"
    );

    Ok(MatchRecord {
        outcome,
        final_board: game.board().clone(),
        played_moves_lan,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Play a series and aggregate win/loss/draw statistics. Colors are
/// assigned per game from a generator seeded with `base_seed`.
pub fn play_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &SeriesConfig,
) -> ChessResult<SeriesStats>
where
    F1: Fn() -> Box<dyn Strategy>,
    F2: Fn() -> Box<dyn Strategy>,
{
    let mut stats = SeriesStats {
        games: config.games,
        ..SeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for game in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let record = if player1_is_white {
            play_match(player1_factory(), player2_factory(), &config.per_game)?
        } else {
            play_match(player2_factory(), player1_factory(), &config.per_game)?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_white {
            (
                record.white_move_count,
                record.white_total_time_ns,
                record.black_move_count,
                record.black_total_time_ns,
            )
        } else {
            (
                record.black_move_count,
                record.black_total_time_ns,
                record.white_move_count,
                record.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let player1_color = if player1_is_white {
            Color::White
        } else {
            Color::Black
        };
        let winner = match record.outcome.winner() {
            Some(color) if color == player1_color => {
                stats.player1_wins += 1;
                Some(PlayerId::Player1)
            }
            Some(_) => {
                stats.player2_wins += 1;
                Some(PlayerId::Player2)
            }
            None => {
                stats.draws += 1;
                None
            }
        };
        stats.outcomes.push((winner, record.outcome));

        info!(
            game = game + 1,
            games = config.games,
            player1_white = player1_is_white,
            outcome = ?record.outcome,
            "series game finished"
        );
    }

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_greedy::GreedyStrategy;
    use crate::engines::engine_minimax::MinimaxStrategy;
    use crate::engines::engine_random::RandomStrategy;

    #[test]
    fn random_game_respects_the_ply_cap() {
        let config = HarnessConfig {
            max_plies: 40,
            ..HarnessConfig::default()
        };
        let record = play_match(
            Box::new(RandomStrategy::seeded(11)),
            Box::new(RandomStrategy::seeded(12)),
            &config,
        )
        .expect("match runs");
        assert!(record.played_moves_lan.len() <= 40);
        assert_eq!(
            record.white_move_count + record.black_move_count,
            record.played_moves_lan.len() as u32
        );
        assert!(record.finished_at >= record.started_at);
    }

    #[test]
    fn minimax_converts_a_back_rank_mate() {
        let config = HarnessConfig {
            max_plies: 10,
            start_placement: Some("6k1/5ppp/8/8/8/8/8/R5K1".to_owned()),
            first_to_move: Color::White,
        };
        let record = play_match(
            Box::new(MinimaxStrategy::with_depth(2)),
            Box::new(GreedyStrategy::new()),
            &config,
        )
        .expect("match runs");
        assert_eq!(
            record.outcome,
            MatchOutcome::Finished(GameResult::WhiteWinsCheckmate)
        );
        assert_eq!(record.played_moves_lan, vec!["a1a8".to_owned()]);
    }

    #[test]
    fn series_counts_every_game() {
        let config = SeriesConfig {
            games: 3,
            base_seed: 5,
            per_game: HarnessConfig {
                max_plies: 20,
                ..HarnessConfig::default()
            },
        };
        let stats = play_series(
            || Box::new(RandomStrategy::seeded(1)),
            || Box::new(RandomStrategy::seeded(2)),
            &config,
        )
        .expect("series runs");
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert!(stats.report().starts_with("games=3"));
    }
}
