//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without protocol
//! I/O, with an optional seeded random opening prefix. The harness keeps
//! the authoritative board; the engines mirror it through real moves.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, GameResult, InitialPosition, Move};
use crate::utils::algebraic::move_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    BlackWin,
    WhiteWin,
    Draw,
    AbortMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Color },
    Draw,
    AbortMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub init_pos: InitialPosition,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            // A game plus every possible pass fits well under this.
            max_plies: 130,
            opening_min_plies: 0,
            opening_max_plies: 6,
            init_pos: InitialPosition::Cross,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub black_move_count: u32,
    pub white_move_count: u32,
    pub black_total_time_ns: u128,
    pub white_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `engine_black` plays Black, `engine_white` plays White.
pub fn play_engine_match(
    mut engine_black: Box<dyn Engine>,
    mut engine_white: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    engine_black.clear_board(config.init_pos);
    engine_white.clear_board(config.init_pos);
    let mut board = Board::with_initial_position(config.init_pos);

    let opening_moves = apply_seeded_random_opening(
        &mut board,
        &mut [&mut engine_black, &mut engine_white],
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;

    let mut played_moves = Vec::<String>::new();
    let mut black_move_count = 0u32;
    let mut white_move_count = 0u32;
    let mut black_total_time_ns = 0u128;
    let mut white_total_time_ns = 0u128;

    let mut finished = false;
    for _ in 0..config.max_plies {
        if board.result(Color::Black) != GameResult::NotEnd {
            finished = true;
            break;
        }

        let mover = board.side_to_move();
        let started = Instant::now();
        let out = match mover {
            Color::Black => engine_black.generate_move(mover, &config.go_params)?,
            Color::White => engine_white.generate_move(mover, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out
            .best_move
            .ok_or("engine returned no move in an unfinished game")?;
        if !board.is_legal_move(chosen) {
            return Err(format!(
                "engine returned illegal move {}",
                move_to_string(&chosen)
            ));
        }
        played_moves.push(move_to_string(&chosen));
        board.update(chosen);
        if !engine_black.apply_real_move(chosen) || !engine_white.apply_real_move(chosen) {
            return Err("engine rejected a legal real move".to_owned());
        }
    }
    if !finished && board.result(Color::Black) != GameResult::NotEnd {
        finished = true;
    }

    let outcome = if finished {
        match board.result(Color::Black) {
            GameResult::Win => MatchOutcome::BlackWin,
            GameResult::Lose => MatchOutcome::WhiteWin,
            GameResult::Draw => MatchOutcome::Draw,
            GameResult::NotEnd => unreachable!("finished games have a result"),
        }
    } else {
        MatchOutcome::AbortMaxPlies
    };

    Ok(MatchResult {
        outcome,
        final_board: board,
        opening_moves,
        played_moves,
        black_move_count,
        white_move_count,
        black_total_time_ns,
        white_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_black = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (black, white) = if player1_is_black {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} black={} white={}",
                i + 1,
                config.games,
                seed,
                black,
                white
            );
        }

        let result = if player1_is_black {
            play_engine_match(
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?
        } else {
            play_engine_match(
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?
        };

        if player1_is_black {
            stats.player1_moves = stats.player1_moves.saturating_add(result.black_move_count);
            stats.player2_moves = stats.player2_moves.saturating_add(result.white_move_count);
            stats.player1_total_time_ns = stats
                .player1_total_time_ns
                .saturating_add(result.black_total_time_ns);
            stats.player2_total_time_ns = stats
                .player2_total_time_ns
                .saturating_add(result.white_total_time_ns);
        } else {
            stats.player1_moves = stats.player1_moves.saturating_add(result.white_move_count);
            stats.player2_moves = stats.player2_moves.saturating_add(result.black_move_count);
            stats.player1_total_time_ns = stats
                .player1_total_time_ns
                .saturating_add(result.white_total_time_ns);
            stats.player2_total_time_ns = stats
                .player2_total_time_ns
                .saturating_add(result.black_total_time_ns);
        }

        let mapped = match result.outcome {
            MatchOutcome::BlackWin => {
                let player = if player1_is_black {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin {
                    player,
                    color: Color::Black,
                }
            }
            MatchOutcome::WhiteWin => {
                let player = if player1_is_black {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                } else {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                };
                SeriesOutcome::PlayerWin {
                    player,
                    color: Color::White,
                }
            }
            MatchOutcome::Draw => {
                stats.draws += 1;
                SeriesOutcome::Draw
            }
            MatchOutcome::AbortMaxPlies => SeriesOutcome::AbortMaxPlies,
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                mapped,
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

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

fn apply_seeded_random_opening(
    board: &mut Board,
    engines: &mut [&mut Box<dyn Engine>],
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> Result<Vec<String>, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if board.result(Color::Black) != GameResult::NotEnd {
            break;
        }
        let legal_moves = board.legal_moves();
        let chosen = legal_moves[rng.random_range(0..legal_moves.len())];
        opening_moves.push(move_to_string(&chosen));
        board.update(chosen);
        for engine in engines.iter_mut() {
            if !engine.apply_real_move(chosen) {
                return Err("engine rejected an opening move".to_owned());
            }
        }
    }

    Ok(opening_moves)
}

#[cfg(test)]
mod tests {
    use super::{
        play_engine_match, play_engine_match_series, MatchConfig, MatchOutcome, MatchSeriesConfig,
        SeriesOutcome,
    };
    use crate::engines::engine_mcts::MctsEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::GoParams;
    use crate::game_state::reversi_types::{Color, GameResult};
    use crate::utils::xorshift::Xorshift;

    fn fast_params() -> GoParams {
        GoParams {
            movetime_ms: Some(60_000),
            max_simulations: None,
            max_iterations: Some(80),
        }
    }

    #[test]
    fn match_harness_runs_random_vs_random_to_completion() {
        let result = play_engine_match(
            Box::new(RandomEngine::new()),
            Box::new(RandomEngine::new()),
            42,
            MatchConfig {
                opening_min_plies: 2,
                opening_max_plies: 6,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        assert!(!result.opening_moves.is_empty());
        assert!(result.black_move_count + result.white_move_count > 0);
        assert_ne!(result.outcome, MatchOutcome::AbortMaxPlies);
        assert_ne!(result.final_board.result(Color::Black), GameResult::NotEnd);
    }

    #[test]
    fn match_series_aggregates_mcts_vs_random() {
        let stats = play_engine_match_series(
            || Box::new(MctsEngine::with_rng(40, 8_192, Xorshift::new(21))),
            || Box::new(RandomEngine::new()),
            MatchSeriesConfig {
                games: 2,
                base_seed: 777,
                per_game: MatchConfig {
                    opening_min_plies: 2,
                    opening_max_plies: 4,
                    go_params: fast_params(),
                    ..MatchConfig::default()
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 2);
        assert_eq!(stats.outcomes.len(), 2);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 2);
        assert!(stats.player1_avg_move_time_ms >= 0.0);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        assert!(stats
            .outcomes
            .iter()
            .all(|o| !matches!(o, SeriesOutcome::AbortMaxPlies)));
        assert!(stats.report().contains("games=2"));
    }
}
