//! Core bitboard position representation.
//!
//! `Board` is the central model for the engine: two disjoint color masks,
//! the side to move, a consecutive-pass counter, and a lazily memoized
//! legal-move mask. It is a plain value type, copied freely by the search
//! during expansion and rollouts.

use crate::game_state::board_error::{BoardError, BoardResult};
use crate::game_state::reversi_types::{
    Color, GameResult, InitialPosition, Move, MovePos, Square, BOARD_SIZE, GRID_NUM,
};
use crate::move_generation::legal_mask::{calc_flip_mask, calc_legal_mask};

/// Handicap discs are placed corner by corner in this order.
pub const HANDICAP_POSITIONS: [(u8, u8); 4] = [(0, 0), (7, 7), (7, 0), (0, 7)];

#[derive(Debug, Clone, Copy)]
pub struct Board {
    black: u64,
    white: u64,
    side_to_move: Color,
    pass_count: u8,
    // Memoized legal-destination mask; `None` after any mutation.
    legal_cache: Option<u64>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard game start (Cross opening), black to move.
    #[inline]
    pub fn new() -> Self {
        Self::with_initial_position(InitialPosition::Cross)
    }

    /// An empty board with black to move. Used for handicap setup.
    #[inline]
    pub fn empty() -> Self {
        Self {
            black: 0,
            white: 0,
            side_to_move: Color::Black,
            pass_count: 0,
            legal_cache: None,
        }
    }

    pub fn with_initial_position(init_pos: InitialPosition) -> Self {
        let mut board = Self::empty();
        let placements: [(Color, u8, u8); 4] = match init_pos {
            InitialPosition::Cross => [
                (Color::Black, 4, 3),
                (Color::Black, 3, 4),
                (Color::White, 3, 3),
                (Color::White, 4, 4),
            ],
            InitialPosition::Parallel => [
                (Color::Black, 3, 4),
                (Color::Black, 4, 4),
                (Color::White, 3, 3),
                (Color::White, 4, 3),
            ],
        };
        for (color, x, y) in placements {
            board
                .put_disc(color, x, y)
                .expect("initial placements target empty in-range squares");
        }
        board
    }

    /// Rebuild a position from raw masks. The masks must be disjoint.
    pub fn from_masks(black: u64, white: u64, side_to_move: Color) -> Self {
        debug_assert_eq!(black & white, 0);
        Self {
            black,
            white,
            side_to_move,
            pass_count: 0,
            legal_cache: None,
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }

    #[inline]
    pub fn mask(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Disc color at `(x, y)`, or `None` for an empty square.
    pub fn get_color(&self, x: u8, y: u8) -> BoardResult<Option<Color>> {
        let bit = 1u64 << square_index(x, y)?;
        if self.black & bit != 0 {
            Ok(Some(Color::Black))
        } else if self.white & bit != 0 {
            Ok(Some(Color::White))
        } else {
            Ok(None)
        }
    }

    #[inline]
    pub fn disc_count(&self, color: Color) -> u32 {
        self.mask(color).count_ones()
    }

    #[inline]
    pub fn blank_count(&self) -> u32 {
        u32::from(GRID_NUM) - (self.black | self.white).count_ones()
    }

    /// Game outcome relative to `color`. Only decidable once two passes
    /// occurred consecutively; otherwise `NotEnd`.
    pub fn result(&self, color: Color) -> GameResult {
        if self.pass_count < 2 {
            return GameResult::NotEnd;
        }
        let black_count = self.disc_count(Color::Black);
        let white_count = self.disc_count(Color::White);
        if black_count == white_count {
            return GameResult::Draw;
        }
        let black_wins = black_count > white_count;
        if black_wins == (color == Color::Black) {
            GameResult::Win
        } else {
            GameResult::Lose
        }
    }

    /// Legal-destination mask for the side to move, memoized until the
    /// next mutation.
    pub fn legal_mask(&mut self) -> u64 {
        if let Some(mask) = self.legal_cache {
            return mask;
        }
        let (player, opponent) = match self.side_to_move {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        };
        let mask = calc_legal_mask(player, opponent);
        self.legal_cache = Some(mask);
        mask
    }

    /// Whether `mv` is acceptable: right color and, for placements, a
    /// destination inside the legal mask. A pass is only legal when the
    /// mask is empty.
    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        if mv.color != self.side_to_move {
            return false;
        }
        let mask = self.legal_mask();
        match mv.pos {
            MovePos::Place(_) => mv.bit() & mask != 0,
            MovePos::Pass => mask == 0,
        }
    }

    /// Enumerate the moves available to the side to move, in ascending
    /// grid-index order. Yields a single pass when no placement exists,
    /// and nothing at all once the game has ended on two passes.
    pub fn next_moves(&mut self, moves: &mut [Move]) -> usize {
        if self.pass_count >= 2 {
            return 0;
        }
        let legal = self.legal_mask();
        if legal == 0 {
            moves[0] = Move::pass(self.side_to_move);
            return 1;
        }
        let mut remaining = legal;
        let mut count = 0;
        while remaining != 0 {
            let square = remaining.trailing_zeros() as Square;
            moves[count] = Move::place(self.side_to_move, square);
            remaining &= remaining - 1;
            count += 1;
        }
        count
    }

    /// Convenience wrapper over [`Board::next_moves`] for callers that are
    /// not on the search hot path.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut buffer = [Move::pass(self.side_to_move); GRID_NUM as usize];
        let count = self.next_moves(&mut buffer);
        buffer[..count].to_vec()
    }

    /// Checked move application. Rejects wrong-color moves, placements
    /// outside the legal mask, and premature passes.
    pub fn apply(&mut self, mv: Move) -> BoardResult<()> {
        if !self.is_legal_move(mv) {
            return Err(BoardError::IllegalMove);
        }
        self.update(mv);
        Ok(())
    }

    /// Unchecked move application for the search hot path. The move must
    /// come from [`Board::next_moves`] on this exact position.
    pub fn update(&mut self, mv: Move) {
        match mv.pos {
            MovePos::Place(_) => {
                let put = mv.bit();
                let (player, opponent) = match self.side_to_move {
                    Color::Black => (&mut self.black, &mut self.white),
                    Color::White => (&mut self.white, &mut self.black),
                };
                let flips = calc_flip_mask(put, *player, *opponent);
                *player ^= put | flips;
                *opponent ^= flips;
                self.pass_count = 0;
            }
            MovePos::Pass => self.pass_count += 1,
        }
        self.legal_cache = None;
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Place a disc directly without flipping anything. Handicap and
    /// initial-position setup only.
    pub fn put_disc(&mut self, color: Color, x: u8, y: u8) -> BoardResult<()> {
        let bit = 1u64 << square_index(x, y)?;
        if (self.black | self.white) & bit != 0 {
            return Err(BoardError::SquareOccupied);
        }
        self.legal_cache = None;
        match color {
            Color::Black => self.black |= bit,
            Color::White => self.white |= bit,
        }
        Ok(())
    }

    /// Place `num` black handicap discs in the corners, returning the
    /// coordinates used. Fails without mutating when any target corner is
    /// occupied or `num` exceeds the corner count.
    pub fn set_handicap(&mut self, num: usize) -> BoardResult<Vec<(u8, u8)>> {
        if num > HANDICAP_POSITIONS.len() {
            return Err(BoardError::OutOfBounds);
        }
        for &(x, y) in &HANDICAP_POSITIONS[..num] {
            if self.get_color(x, y)?.is_some() {
                return Err(BoardError::SquareOccupied);
            }
        }
        for &(x, y) in &HANDICAP_POSITIONS[..num] {
            self.put_disc(Color::Black, x, y)?;
        }
        Ok(HANDICAP_POSITIONS[..num].to_vec())
    }

    /// Override the side to move. Used by the engine wrapper when the
    /// protocol layer forces a turn change.
    pub fn change_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
        self.legal_cache = None;
    }

    /// Positional equality: bitboards and side to move. The pass counter
    /// and the memoized mask are deliberately ignored, matching how the
    /// search tree matches a real move against its children.
    #[inline]
    pub fn same_position(&self, other: &Board) -> bool {
        self.black == other.black
            && self.white == other.white
            && self.side_to_move == other.side_to_move
    }
}

#[inline]
fn square_index(x: u8, y: u8) -> BoardResult<Square> {
    if x >= BOARD_SIZE || y >= BOARD_SIZE {
        return Err(BoardError::OutOfBounds);
    }
    Ok(x + y * BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::{Board, HANDICAP_POSITIONS};
    use crate::game_state::board_error::BoardError;
    use crate::game_state::reversi_types::{Color, GameResult, InitialPosition, Move, MovePos};

    #[test]
    fn cross_start_has_four_legal_moves_for_black() {
        let mut board = Board::new();
        assert_eq!(board.side_to_move(), Color::Black);
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| !mv.is_pass()));
    }

    #[test]
    fn legal_moves_ascend_and_are_cached() {
        let mut board = Board::new();
        let first = board.legal_moves();
        let second = board.legal_moves();
        assert_eq!(first, second);
        let squares: Vec<_> = first
            .iter()
            .map(|mv| match mv.pos {
                MovePos::Place(square) => square,
                MovePos::Pass => unreachable!("start position has placements"),
            })
            .collect();
        let mut sorted = squares.clone();
        sorted.sort_unstable();
        assert_eq!(squares, sorted);
    }

    #[test]
    fn masks_stay_disjoint_and_counts_stay_consistent() {
        let mut board = Board::new();
        for _ in 0..20 {
            if board.result(Color::Black) != GameResult::NotEnd {
                break;
            }
            let mv = board.legal_moves()[0];
            board.apply(mv).expect("enumerated moves are legal");
            assert_eq!(board.mask(Color::Black) & board.mask(Color::White), 0);
            assert_eq!(
                board.disc_count(Color::Black) + board.disc_count(Color::White)
                    + board.blank_count(),
                64
            );
        }
    }

    #[test]
    fn apply_rejects_wrong_color_and_illegal_destination() {
        let mut board = Board::new();
        assert_eq!(
            board.apply(Move::place(Color::White, 19)),
            Err(BoardError::IllegalMove)
        );
        assert_eq!(
            board.apply(Move::place(Color::Black, 0)),
            Err(BoardError::IllegalMove)
        );
        assert_eq!(
            board.apply(Move::pass(Color::Black)),
            Err(BoardError::IllegalMove)
        );
    }

    #[test]
    fn side_to_move_flips_after_every_apply_including_pass() {
        let mut board = Board::from_masks(1, 1 << 63, Color::Black);
        // The discs are too far apart for any flip, so black must pass.
        assert!(board.legal_moves()[0].is_pass());
        board.apply(Move::pass(Color::Black)).expect("pass is legal");
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.pass_count(), 1);
    }

    #[test]
    fn two_consecutive_passes_decide_the_result() {
        let mut board = Board::from_masks(0b111, 0b1000, Color::Black);
        board.update(Move::pass(Color::Black));
        assert_eq!(board.result(Color::Black), GameResult::NotEnd);
        board.update(Move::pass(Color::White));
        assert_eq!(board.result(Color::Black), GameResult::Win);
        assert_eq!(board.result(Color::White), GameResult::Lose);
        // Exactly one of win/lose/draw holds per color.
        assert_ne!(board.result(Color::Black), board.result(Color::White));
    }

    #[test]
    fn drawn_board_reports_draw_for_both_colors() {
        let mut board = Board::from_masks(0b11, 0b1100, Color::Black);
        board.update(Move::pass(Color::Black));
        board.update(Move::pass(Color::White));
        assert_eq!(board.result(Color::Black), GameResult::Draw);
        assert_eq!(board.result(Color::White), GameResult::Draw);
    }

    #[test]
    fn finished_game_enumerates_no_moves() {
        let mut board = Board::from_masks(0b111, 0b1000, Color::Black);
        board.update(Move::pass(Color::Black));
        board.update(Move::pass(Color::White));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn non_pass_move_resets_the_pass_counter() {
        let mut board = Board::new();
        // Force a recorded pass, then restore black's turn artificially.
        board.update(Move::pass(Color::Black));
        board.change_side_to_move(Color::Black);
        assert_eq!(board.pass_count(), 1);
        let mv = board.legal_moves()[0];
        board.apply(mv).expect("enumerated moves are legal");
        assert_eq!(board.pass_count(), 0);
    }

    #[test]
    fn put_disc_rejects_occupied_and_out_of_range_squares() {
        let mut board = Board::new();
        assert_eq!(
            board.put_disc(Color::Black, 3, 3),
            Err(BoardError::SquareOccupied)
        );
        assert_eq!(
            board.put_disc(Color::Black, 8, 0),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(board.get_color(3, 3), Ok(Some(Color::White)));
        assert_eq!(board.get_color(0, 0), Ok(None));
    }

    #[test]
    fn put_disc_invalidates_the_legal_cache() {
        let mut board = Board::new();
        let before = board.legal_mask();
        board
            .put_disc(Color::White, 2, 3)
            .expect("c4 is empty at the start");
        let after = board.legal_mask();
        assert_ne!(before, after);
    }

    #[test]
    fn handicap_places_black_corner_discs() {
        let mut board = Board::empty();
        let placed = board.set_handicap(3).expect("corners are empty");
        assert_eq!(placed, HANDICAP_POSITIONS[..3].to_vec());
        assert_eq!(board.disc_count(Color::Black), 3);
        assert_eq!(board.set_handicap(5), Err(BoardError::OutOfBounds));
        assert_eq!(board.set_handicap(1), Err(BoardError::SquareOccupied));
    }

    #[test]
    fn parallel_opening_places_same_colors_side_by_side() {
        let board = Board::with_initial_position(InitialPosition::Parallel);
        assert_eq!(board.get_color(3, 4), Ok(Some(Color::Black)));
        assert_eq!(board.get_color(4, 4), Ok(Some(Color::Black)));
        assert_eq!(board.get_color(3, 3), Ok(Some(Color::White)));
        assert_eq!(board.get_color(4, 3), Ok(Some(Color::White)));
    }

    #[test]
    fn same_position_ignores_pass_count() {
        let mut a = Board::from_masks(0b1, 0b10, Color::Black);
        let b = a;
        a.update(Move::pass(Color::Black));
        a.change_side_to_move(Color::Black);
        assert!(a.same_position(&b));
        a.change_side_to_move(Color::White);
        assert!(!a.same_position(&b));
    }
}
