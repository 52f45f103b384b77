//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for
//! diagnostics, integration testing, and as a baseline opponent in match
//! series.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, GameResult, InitialPosition, Move};

pub struct RandomEngine {
    board: Board,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "cherry-random"
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
        let legal_moves = self.board.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("legal_moves {}", legal_moves.len()));

        if legal_moves.is_empty() {
            out.best_move = None;
            return Ok(out);
        }

        let mut rng = rand::rng();
        let picked = legal_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose a random move")?;

        out.best_move = Some(*picked);
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
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;
    use crate::game_state::reversi_types::{Color, GameResult, Move};

    #[test]
    fn random_engine_always_picks_a_legal_move() {
        let mut engine = RandomEngine::new();
        for _ in 0..30 {
            let color = engine.board().side_to_move();
            let output = engine
                .generate_move(color, &GoParams::default())
                .expect("selection succeeds");
            let Some(mv) = output.best_move else {
                break;
            };
            assert!(engine.apply_real_move(mv));
        }
    }

    #[test]
    fn finished_game_yields_no_move() {
        let mut engine = RandomEngine::new();
        let mut board = Board::from_masks(0b111, 0b1000, Color::Black);
        board.update(Move::pass(Color::Black));
        board.update(Move::pass(Color::White));
        engine.set_position(board);
        let output = engine
            .generate_move(Color::Black, &GoParams::default())
            .expect("selection succeeds");
        assert!(output.best_move.is_none());
        assert_eq!(engine.get_result(Color::Black), GameResult::Win);
    }
}
