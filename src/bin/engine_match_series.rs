//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`

use cherry_reversi::engines::engine_mcts::MctsEngine;
use cherry_reversi::engines::engine_random::RandomEngine;
use cherry_reversi::engines::engine_trait::{Engine, GoParams};
use cherry_reversi::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Customize these two lines to experiment with different opponents.
    let player1 = || Box::new(MctsEngine::with_options(40, 250_000)) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                opening_min_plies: 2,
                opening_max_plies: 6,
                go_params: GoParams {
                    movetime_ms: Some(500),
                    max_simulations: Some(8_000),
                    max_iterations: None,
                },
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
