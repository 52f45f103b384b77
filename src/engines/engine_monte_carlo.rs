//! Flat Monte-Carlo engine.
//!
//! No tree: every candidate move gets the same budget of uniformly random
//! playouts and the best mean score wins. Candidate moves are split across
//! worker threads, each with its own deterministically derived rollout
//! generator, so results are reproducible for a fixed seed and worker
//! count.

use std::thread;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::reversi_types::{
    Color, GameResult, InitialPosition, Move, MAX_MOVE_NUM, WIN_SCORE,
};
use crate::utils::xorshift::Xorshift;

pub const DEFAULT_PLAYOUT_COUNT: u32 = 1_000;

pub struct MonteCarloEngine {
    board: Board,
    playout_count: u32,
    workers: usize,
    base_seed: u32,
}

impl MonteCarloEngine {
    pub fn new(playout_count: u32, workers: usize) -> Self {
        Self::with_seed(playout_count, workers, Xorshift::from_entropy().next_u32())
    }

    pub fn with_seed(playout_count: u32, workers: usize, base_seed: u32) -> Self {
        Self {
            board: Board::new(),
            playout_count: playout_count.max(1),
            workers: workers.max(1),
            base_seed,
        }
    }

    /// Mean playout score of `mv` for the player making it.
    fn evaluate_move(board: &Board, mv: Move, playouts: u32, rng: &mut Xorshift) -> f32 {
        let mut after = *board;
        after.update(mv);
        let mut sum = 0.0;
        for _ in 0..playouts {
            // The rollout scores the opponent, who moves next.
            sum += WIN_SCORE - simulate(after, rng);
        }
        sum / playouts as f32
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYOUT_COUNT, 1)
    }
}

/// Play uniformly random moves to the end and score the outcome for the
/// player to move at the start.
fn simulate(mut board: Board, rng: &mut Xorshift) -> f32 {
    let perspective = board.side_to_move();
    let mut buffer = [Move::pass(Color::Black); MAX_MOVE_NUM];
    loop {
        let result = board.result(perspective);
        if result != GameResult::NotEnd {
            return result.score();
        }
        let count = board.next_moves(&mut buffer);
        board.update(buffer[rng.next_below(count as u32) as usize]);
    }
}

impl Engine for MonteCarloEngine {
    fn name(&self) -> &str {
        "cherry-flat-mc"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn clear_board(&mut self, init_pos: InitialPosition) {
        self.board = Board::with_initial_position(init_pos);
    }

    fn set_position(&mut self, board: Board) {
        self.board = board;
    }

    fn apply_real_move(&mut self, mv: Move) -> bool {
        self.board.apply(mv).is_ok()
    }

    fn generate_move(&mut self, color: Color, _params: &GoParams) -> Result<EngineOutput, String> {
        if color != self.board.side_to_move() {
            self.board.change_side_to_move(color);
        }
        let moves = self.board.legal_moves();

        let mut out = EngineOutput::default();
        if moves.is_empty() {
            out.best_move = None;
            return Ok(out);
        }

        let board = self.board;
        let playouts = self.playout_count;
        let base_seed = self.base_seed;
        let chunk_size = moves.len().div_ceil(self.workers);
        let mut scored: Vec<(Move, f32)> = Vec::with_capacity(moves.len());
        thread::scope(|scope| {
            let mut handles = Vec::new();
            for (worker, chunk) in moves.chunks(chunk_size).enumerate() {
                let chunk = chunk.to_vec();
                handles.push(scope.spawn(move || {
                    let mut rng = Xorshift::new(base_seed.wrapping_add(worker as u32 + 1));
                    chunk
                        .into_iter()
                        .map(|mv| {
                            (mv, Self::evaluate_move(&board, mv, playouts, &mut rng))
                        })
                        .collect::<Vec<_>>()
                }));
            }
            for handle in handles {
                match handle.join() {
                    Ok(part) => scored.extend(part),
                    Err(_) => scored.clear(),
                }
            }
        });
        if scored.is_empty() {
            return Err("playout worker panicked".to_string());
        }

        let mut best = scored[0];
        for &(mv, score) in &scored[1..] {
            if score > best.1 {
                best = (mv, score);
            }
        }
        out.info_lines.push(format!(
            "playouts {} per move, best mean {:.3}",
            playouts, best.1
        ));
        out.best_move = Some(best.0);
        Ok(out)
    }

    fn put_disc(&mut self, color: Color, x: u8, y: u8) -> Result<(), String> {
        self.board
            .put_disc(color, x, y)
            .map_err(|err| err.to_string())
    }

    fn set_handicap(&mut self, num: usize) -> Result<Vec<(u8, u8)>, String> {
        self.board.set_handicap(num).map_err(|err| err.to_string())
    }

    fn get_result(&self, color: Color) -> GameResult {
        self.board.result(color)
    }

    fn get_disc_count(&self, color: Color) -> u32 {
        self.board.disc_count(color)
    }

    fn get_color(&self, x: u8, y: u8) -> Result<Option<Color>, String> {
        self.board.get_color(x, y).map_err(|err| err.to_string())
    }

    fn board(&self) -> &Board {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::MonteCarloEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;
    use crate::game_state::reversi_types::{Color, Move};

    #[test]
    fn picks_a_legal_move_from_the_start() {
        let mut engine = MonteCarloEngine::with_seed(50, 2, 99);
        let output = engine
            .generate_move(Color::Black, &GoParams::default())
            .expect("evaluation succeeds");
        let mv = output.best_move.expect("start position has moves");
        let mut board = Board::new();
        assert!(board.apply(mv).is_ok());
    }

    #[test]
    fn same_seed_and_worker_count_reproduce_the_choice() {
        let run = || {
            let mut engine = MonteCarloEngine::with_seed(80, 2, 4242);
            engine
                .generate_move(Color::Black, &GoParams::default())
                .expect("evaluation succeeds")
                .best_move
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn finished_game_yields_no_move() {
        let mut engine = MonteCarloEngine::with_seed(10, 1, 1);
        let mut board = Board::from_masks(0b111, 0b1000, Color::Black);
        board.update(Move::pass(Color::Black));
        board.update(Move::pass(Color::White));
        engine.set_position(board);
        let output = engine
            .generate_move(Color::Black, &GoParams::default())
            .expect("evaluation succeeds");
        assert!(output.best_move.is_none());
    }

    #[test]
    fn single_legal_move_is_chosen() {
        // Black at a1, white at b1: c1 is the only flipping placement.
        let mut engine = MonteCarloEngine::with_seed(40, 1, 7);
        let board = Board::from_masks(0b1 | 1 << 16, 0b10 | 1 << 8, Color::Black);
        engine.set_position(board);
        let output = engine
            .generate_move(Color::Black, &GoParams::default())
            .expect("evaluation succeeds");
        assert_eq!(output.best_move, Some(Move::place(Color::Black, 2)));
    }
}
