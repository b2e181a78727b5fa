//! # Deterministic Random Stream
//!
//! Linear-congruential generators used for level generation and enemy AI.
//!
//! The stream is owned by [`GameState`](crate::GameState) and threaded through
//! every consumer explicitly, so the call order (and therefore every level a
//! seed produces) stays reproducible.

use serde::{Deserialize, Serialize};

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;

const LEVEL_SEED_MULTIPLIER: u32 = 1_664_525;
const LEVEL_SEED_INCREMENT: u32 = 1_013_904_223;

/// A 32-bit linear-congruential byte generator.
///
/// # Examples
///
/// ```
/// use caverns::Lcg;
///
/// let mut a = Lcg::new(42);
/// let mut b = Lcg::new(42);
/// assert_eq!(a.next_byte(), b.next_byte());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Resets the internal state.
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns bits 16..24 of the new state.
    pub fn next_byte(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 16) as u8
    }

    /// Returns a value in the inclusive range `[min, max]`.
    ///
    /// Callers must guarantee `min <= max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::Lcg;
    ///
    /// let mut rng = Lcg::new(7);
    /// for _ in 0..100 {
    ///     let v = rng.range(4, 8);
    ///     assert!((4..=8).contains(&v));
    /// }
    /// ```
    pub fn range(&mut self, min: u8, max: u8) -> u8 {
        debug_assert!(min <= max, "range({min}, {max}) is empty");
        let span = u16::from(max) - u16::from(min) + 1;
        min + (u16::from(self.next_byte()) % span) as u8
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Derives the seed of the next level from the current one.
///
/// This is a separate LCG from [`Lcg`]; it is only ever used to seed it.
pub fn next_level_seed(seed: u32) -> u32 {
    seed.wrapping_mul(LEVEL_SEED_MULTIPLIER)
        .wrapping_add(LEVEL_SEED_INCREMENT)
}
