//! Deterministic 32-bit xorshift generator for playout sampling.
//!
//! Rollouts need a fast uniform source that can be seeded for reproducible
//! tests. Seeds are always passed in explicitly; `from_entropy` draws one
//! from the process RNG for callers that do not care.

use rand::Rng;

/// Replacement state for a zero seed, which would lock the generator.
const ZERO_SEED_FALLBACK: u32 = 0x9e37_79b9;

#[derive(Debug, Clone)]
pub struct Xorshift {
    state: u32,
}

impl Xorshift {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { ZERO_SEED_FALLBACK } else { seed },
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 15;
        self.state
    }

    /// Uniform draw in `0..max`. `max` must be nonzero.
    #[inline]
    pub fn next_below(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next_u32() % max
    }
}
