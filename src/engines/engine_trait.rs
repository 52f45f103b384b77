//! Engine abstraction layer used by protocol front ends and the match
//! harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.
//! Engines own their board; the caller drives them with real moves and
//! move-generation requests.

use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, GameResult, InitialPosition, Move};

/// Caller-supplied search knobs. Unset fields fall back to the engine's
/// built-in defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub movetime_ms: Option<u64>,
    pub max_simulations: Option<u32>,
    pub max_iterations: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// The move the engine wants to play; `None` when the game is over.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;
    fn version(&self) -> &str;

    /// Reset to a fresh game with the given opening layout.
    fn clear_board(&mut self, init_pos: InitialPosition);

    /// Replace the engine's position outright.
    fn set_position(&mut self, board: Board);

    /// Apply a real game move. Returns `false` on an illegal move, which
    /// the caller translates into a protocol error.
    fn apply_real_move(&mut self, mv: Move) -> bool;

    /// Run a bounded search and report the chosen move. If `color` is not
    /// the engine's side to move, the engine adopts it first.
    fn generate_move(&mut self, color: Color, params: &GoParams) -> Result<EngineOutput, String>;

    /// Place a disc directly without flipping anything, as in board setup.
    fn put_disc(&mut self, color: Color, x: u8, y: u8) -> Result<(), String>;

    /// Place black handicap discs in the corners, returning the
    /// coordinates used.
    fn set_handicap(&mut self, num: usize) -> Result<Vec<(u8, u8)>, String>;

    fn get_result(&self, color: Color) -> GameResult;
    fn get_disc_count(&self, color: Color) -> u32;
    fn get_color(&self, x: u8, y: u8) -> Result<Option<Color>, String>;

    /// Read-only view of the engine's current position.
    fn board(&self) -> &Board;
}
