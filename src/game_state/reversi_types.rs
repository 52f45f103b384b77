//! Shared value types for the Reversi board and search layers.
//!
//! Colors, game results, move representation, and the board-geometry
//! constants every other subsystem builds on.

/// Board edge length.
pub const BOARD_SIZE: u8 = 8;
/// Number of grid squares.
pub const GRID_NUM: u8 = BOARD_SIZE * BOARD_SIZE;
/// Upper bound on the number of legal moves in any reachable position.
/// Used as a static child-array capacity in the search tree.
pub const MAX_MOVE_NUM: usize = 60;

/// Score reported for a won playout.
pub const WIN_SCORE: f32 = 1.0;
/// Score reported for a drawn playout.
pub const DRAW_SCORE: f32 = 0.5;
/// Score reported for a lost playout.
pub const LOSE_SCORE: f32 = 0.0;

/// Side to move / disc color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Outcome of a finished game, relative to a queried color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Draw,
    Lose,
    NotEnd,
}

impl GameResult {
    /// Playout score for this outcome (`NotEnd` scores zero and is never
    /// fed into node statistics).
    #[inline]
    pub const fn score(self) -> f32 {
        match self {
            GameResult::Win => WIN_SCORE,
            GameResult::Draw => DRAW_SCORE,
            GameResult::Lose => LOSE_SCORE,
            GameResult::NotEnd => 0.0,
        }
    }
}

/// Board square index (`0..=63`, row-major: `x + y * 8`).
pub type Square = u8;

/// Move destination: a grid square or a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePos {
    Place(Square),
    Pass,
}

/// A move: who plays, and where (or a pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub color: Color,
    pub pos: MovePos,
}

impl Move {
    #[inline]
    pub const fn place(color: Color, square: Square) -> Self {
        Self {
            color,
            pos: MovePos::Place(square),
        }
    }

    #[inline]
    pub const fn pass(color: Color) -> Self {
        Self {
            color,
            pos: MovePos::Pass,
        }
    }

    #[inline]
    pub const fn is_pass(self) -> bool {
        matches!(self.pos, MovePos::Pass)
    }

    /// One-hot bitboard of the destination square; zero for a pass.
    #[inline]
    pub const fn bit(self) -> u64 {
        match self.pos {
            MovePos::Place(square) => 1u64 << square,
            MovePos::Pass => 0,
        }
    }
}

/// Standard opening layouts for a fresh board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPosition {
    /// Standard game start: the four center discs in a cross.
    Cross,
    /// Variant start with same-color discs side by side.
    Parallel,
}
