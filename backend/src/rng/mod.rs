//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, seedable arrangement shuffles.
//! CRITICAL: All randomness in a draw MUST come through a `RandomSource`
//! handed in by the caller. The engine never reaches for a global generator.

mod xorshift;

pub use xorshift::RngManager;

/// Source of randomness consumed by the arrangement generator.
///
/// Implementations need not be cryptographically secure. Each concurrent
/// draw should own its own source (see [`RngManager::from_entropy`]).
pub trait RandomSource {
    /// Next raw 64-bit value
    fn next_u64(&mut self) -> u64;

    /// Near-uniform index in `[0, bound)`
    ///
    /// Reduces by modulo, so lower indices are favoured by at most
    /// `bound / 2^64`. Negligible for roster-sized bounds.
    ///
    /// # Panics
    /// Panics if `bound == 0`
    fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        (self.next_u64() % bound as u64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
