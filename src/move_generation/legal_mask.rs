//! Branch-light bitboard move generation.
//!
//! Legal destinations are computed with a parallel-prefix flood along each
//! of the four board axes (left-right, top-bottom, both diagonals), and
//! flip patterns with an 8-direction ray cast. Edge-exclusion constants
//! keep shifted patterns from wrapping across board rows.

/// Opponent mask for horizontal floods: files b..g.
const LR_EDGE_MASK: u64 = 0x7e7e_7e7e_7e7e_7e7e;
/// Opponent mask for vertical floods: ranks 2..7.
const TB_EDGE_MASK: u64 = 0x00ff_ffff_ffff_ff00;
/// Opponent mask for diagonal floods: the inner 6x6 field.
const ALL_EDGE_MASK: u64 = 0x007e_7e7e_7e7e_7e00;

/// The eight ray directions, ordered as (shift, wrap mask) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::DownRight,
    Direction::Down,
    Direction::DownLeft,
    Direction::Left,
    Direction::UpLeft,
];

/// Shift a pattern one step toward `direction`, dropping bits that would
/// wrap across a board edge.
#[inline]
pub const fn shift_toward(pattern: u64, direction: Direction) -> u64 {
    match direction {
        Direction::Up => (pattern << 8) & 0xffff_ffff_ffff_ff00,
        Direction::UpRight => (pattern << 9) & 0xfefe_fefe_fefe_fe00,
        Direction::Right => (pattern << 1) & 0xfefe_fefe_fefe_fefe,
        Direction::DownRight => (pattern >> 7) & 0x00fe_fefe_fefe_fefe,
        Direction::Down => (pattern >> 8) & 0x00ff_ffff_ffff_ffff,
        Direction::DownLeft => (pattern >> 9) & 0x007f_7f7f_7f7f_7f7f,
        Direction::Left => (pattern >> 1) & 0x7f7f_7f7f_7f7f_7f7f,
        Direction::UpLeft => (pattern << 7) & 0x7f7f_7f7f_7f7f_7f00,
    }
}

/// Five-step doubling flood along a left-shift ray: accumulates runs of
/// `masked_opponent` discs adjacent to `player` discs, up to board width
/// minus one.
#[inline]
fn flood_shl(player: u64, masked_opponent: u64, shift: u32) -> u64 {
    let mut run = masked_opponent & (player << shift);
    run |= masked_opponent & (run << shift);
    run |= masked_opponent & (run << shift);
    run |= masked_opponent & (run << shift);
    run |= masked_opponent & (run << shift);
    run
}

/// Mirror of [`flood_shl`] for right-shift rays.
#[inline]
fn flood_shr(player: u64, masked_opponent: u64, shift: u32) -> u64 {
    let mut run = masked_opponent & (player >> shift);
    run |= masked_opponent & (run >> shift);
    run |= masked_opponent & (run >> shift);
    run |= masked_opponent & (run >> shift);
    run |= masked_opponent & (run >> shift);
    run
}

/// Bitboard of every square where `player` may legally place a disc.
pub fn calc_legal_mask(player: u64, opponent: u64) -> u64 {
    let lr_masked = opponent & LR_EDGE_MASK;
    let tb_masked = opponent & TB_EDGE_MASK;
    let all_masked = opponent & ALL_EDGE_MASK;
    let blank = !(player | opponent);

    let mut legal = blank & (flood_shl(player, lr_masked, 1) << 1);
    legal |= blank & (flood_shr(player, lr_masked, 1) >> 1);

    legal |= blank & (flood_shl(player, tb_masked, 8) << 8);
    legal |= blank & (flood_shr(player, tb_masked, 8) >> 8);

    legal |= blank & (flood_shl(player, all_masked, 7) << 7);
    legal |= blank & (flood_shr(player, all_masked, 7) >> 7);

    legal |= blank & (flood_shl(player, all_masked, 9) << 9);
    legal |= blank & (flood_shr(player, all_masked, 9) >> 9);

    legal
}

/// Bitboard of opponent discs flipped by placing at `put_pattern`
/// (one-hot). Each of the 8 rays accumulates opponent discs and commits
/// the run only when it terminates on a same-color disc.
pub fn calc_flip_mask(put_pattern: u64, player: u64, opponent: u64) -> u64 {
    let mut flips = 0u64;
    for direction in DIRECTIONS {
        let mut run = 0u64;
        let mut probe = shift_toward(put_pattern, direction);
        while probe != 0 && (probe & opponent) != 0 {
            run |= probe;
            probe = shift_toward(probe, direction);
        }
        if (probe & player) != 0 {
            flips |= run;
        }
    }
    flips
}
