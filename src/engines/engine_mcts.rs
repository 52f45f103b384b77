//! Tree-search engine built on [`UctTree`].
//!
//! Owns the real game position alongside the search tree and keeps the two
//! synchronized: real moves transplant the tree root so statistics gathered
//! for a position carry over into the next turn instead of being thrown
//! away.

use std::time::Duration;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, GameResult, InitialPosition, Move};
use crate::search::driver::{run_search, select_best_move};
use crate::search::uct::{SearchLimits, UctTree, DEFAULT_EXPANSION_THRESHOLD};
use crate::utils::algebraic::move_to_string;
use crate::utils::xorshift::Xorshift;

pub const NODE_POOL_SIZE: usize = 1_000_000;
pub const MAX_SIM_COUNT: u32 = 32_000;
pub const TIME_LIMIT_MS: u64 = 3_000;

pub struct MctsEngine {
    board: Board,
    tree: UctTree,
    defaults: SearchLimits,
}

impl MctsEngine {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_EXPANSION_THRESHOLD, NODE_POOL_SIZE)
    }

    pub fn with_options(expansion_threshold: u32, pool_size: usize) -> Self {
        Self::build(UctTree::new(expansion_threshold, pool_size))
    }

    /// Seeded construction for reproducible matches and tests.
    pub fn with_rng(expansion_threshold: u32, pool_size: usize, rng: Xorshift) -> Self {
        Self::build(UctTree::with_rng(expansion_threshold, pool_size, rng))
    }

    fn build(tree: UctTree) -> Self {
        let board = Board::new();
        let mut engine = Self {
            board,
            tree,
            defaults: SearchLimits {
                max_iterations: u64::MAX,
                max_simulations: MAX_SIM_COUNT,
                movetime: Duration::from_millis(TIME_LIMIT_MS),
            },
        };
        engine.tree.set_root(board);
        engine
    }

    fn resolve_limits(&self, params: &GoParams) -> SearchLimits {
        SearchLimits {
            max_iterations: params.max_iterations.unwrap_or(self.defaults.max_iterations),
            max_simulations: params
                .max_simulations
                .unwrap_or(self.defaults.max_simulations),
            movetime: params
                .movetime_ms
                .map(Duration::from_millis)
                .unwrap_or(self.defaults.movetime),
        }
    }
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MctsEngine {
    fn name(&self) -> &str {
        "cherry-mcts"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn clear_board(&mut self, init_pos: InitialPosition) {
        self.board = Board::with_initial_position(init_pos);
        self.tree.set_root(self.board);
    }

    fn set_position(&mut self, board: Board) {
        self.board = board;
        self.tree.set_root(board);
    }

    fn apply_real_move(&mut self, mv: Move) -> bool {
        if self.board.apply(mv).is_err() {
            return false;
        }
        // Reuse the matching subtree when the move was anticipated.
        if !self.tree.update_root(&self.board) {
            self.tree.set_root(self.board);
        }
        true
    }

    fn generate_move(&mut self, color: Color, params: &GoParams) -> Result<EngineOutput, String> {
        if color != self.board.side_to_move() {
            // The protocol layer forced a turn change; the old tree no
            // longer describes the position to search.
            self.board.change_side_to_move(color);
            self.tree.set_root(self.board);
        }
        let limits = self.resolve_limits(params);
        let saturation_before = self.tree.saturation_events();
        let result = run_search(&mut self.tree, &limits);
        let best_move = select_best_move(&result);

        let mut info_lines = Vec::new();
        info_lines.push(format!(
            "root visits {} value {:.3} children {}",
            result.root.visits,
            result.root.value,
            result.children.len()
        ));
        if let Some(mv) = best_move {
            if let Some(info) = result.children.iter().find(|info| info.mv == mv) {
                info_lines.push(format!(
                    "best {} visits {} value {:.3}",
                    move_to_string(&mv),
                    info.visits,
                    info.value
                ));
            }
        }
        let saturated = self.tree.saturation_events() - saturation_before;
        if saturated > 0 {
            info_lines.push(format!("node pool saturated {saturated} time(s)"));
        }
        Ok(EngineOutput {
            best_move,
            info_lines,
        })
    }

    fn put_disc(&mut self, color: Color, x: u8, y: u8) -> Result<(), String> {
        self.board
            .put_disc(color, x, y)
            .map_err(|err| err.to_string())?;
        // A direct placement is not a game move, so no child can match.
        self.tree.set_root(self.board);
        Ok(())
    }

    fn set_handicap(&mut self, num: usize) -> Result<Vec<(u8, u8)>, String> {
        let placed = self
            .board
            .set_handicap(num)
            .map_err(|err| err.to_string())?;
        self.tree.set_root(self.board);
        Ok(placed)
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
