//! Strategy-vs-strategy runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --white minimax --black greedy`
//! `RUST_LOG=plum_match=debug cargo run --bin self_play -- --games 5`

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use plum_match::chess_errors::ChessResult;
use plum_match::engines::engine_greedy::GreedyStrategy;
use plum_match::engines::engine_minimax::MinimaxStrategy;
use plum_match::engines::engine_random::RandomStrategy;
use plum_match::engines::engine_trait::Strategy;
use plum_match::search::alpha_beta::SearchConfig;
use plum_match::utils::match_harness::{play_match, play_series, HarnessConfig, SeriesConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Random,
    Greedy,
    Minimax,
}

#[derive(Parser, Debug)]
#[command(about = "Play scripted strategies against each other", author, version)]
struct SelfPlayArgs {
    /// Strategy playing White (player 1 in a series)
    #[arg(long, value_enum, default_value_t = StrategyArg::Minimax)]
    white: StrategyArg,

    /// Strategy playing Black (player 2 in a series)
    #[arg(long, value_enum, default_value_t = StrategyArg::Random)]
    black: StrategyArg,

    /// Minimax search depth
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,

    /// Per-move minimax time budget; enables iterative deepening
    #[arg(long, value_name = "MS")]
    time_ms: Option<u64>,

    /// Seed for random strategies and series color assignment
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a game as a draw after this many plies
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Number of games; more than one plays a series with mixed colors
    #[arg(long, default_value_t = 1)]
    games: u16,

    /// Start from this piece placement (e.g. "6k1/5ppp/8/8/8/8/8/R5K1")
    #[arg(long, value_name = "PLACEMENT")]
    start: Option<String>,
}

impl SelfPlayArgs {
    fn strategy(&self, arg: StrategyArg, seed_offset: u64) -> Box<dyn Strategy> {
        match arg {
            StrategyArg::Random => Box::new(RandomStrategy::seeded(
                self.seed.wrapping_add(seed_offset),
            )),
            StrategyArg::Greedy => Box::new(GreedyStrategy::new()),
            StrategyArg::Minimax => Box::new(MinimaxStrategy::new(SearchConfig {
                max_depth: self.depth,
                time_budget: self.time_ms.map(Duration::from_millis),
            })),
        }
    }
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plum_match=info")),
        )
        .init();

    let args = SelfPlayArgs::parse();
    let per_game = HarnessConfig {
        max_plies: args.max_plies,
        start_placement: args.start.clone(),
        ..HarnessConfig::default()
    };

    if args.games > 1 {
        let stats = play_series(
            || args.strategy(args.white, 1),
            || args.strategy(args.black, 2),
            &SeriesConfig {
                games: args.games,
                base_seed: args.seed,
                per_game,
            },
        )?;
        println!("{}", stats.report());
        println!("outcomes: {:?}", stats.outcomes);
        return Ok(());
    }

    let record = play_match(
        args.strategy(args.white, 1),
        args.strategy(args.black, 2),
        &per_game,
    )?;
    println!("{}", record.final_board);
    println!("moves: {}", record.played_moves_lan.join(" "));
    println!(
        "outcome: {:?} after {} plies ({} ms)",
        record.outcome,
        record.played_moves_lan.len(),
        (record.finished_at - record.started_at).num_milliseconds()
    );
    Ok(())
}
