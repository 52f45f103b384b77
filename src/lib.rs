//! Crate root module declarations for the Cherry Reversi engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! tree search, engines, and utility helpers) so binaries, tests, and
//! external tooling can import stable module paths.

pub mod game_state {
    pub mod board;
    pub mod board_error;
    pub mod reversi_types;
}

pub mod move_generation {
    pub mod legal_mask;
}

pub mod search {
    pub mod driver;
    pub mod node_arena;
    pub mod uct;
}

pub mod engines {
    pub mod engine_mcts;
    pub mod engine_monte_carlo;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod render_board;
    pub mod xorshift;
}
