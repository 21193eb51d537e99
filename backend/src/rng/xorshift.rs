//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for shuffling participant arrangements.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of shuffles → same draw. This is CRITICAL for:
//! - Testing (fixed seeds give reproducible assignments)
//! - Debugging (replay a draw that exhausted its budget)

use super::RandomSource;
use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use secret_draw_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let index = rng.below(10); // [0, 10)
/// assert!(index < 10);
/// # let _ = value;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an independently seeded RNG
    ///
    /// Seeds from a freshly generated v4 UUID, so concurrent draws for
    /// different groups never share a sequence.
    pub fn from_entropy() -> Self {
        let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
        Self::new(high ^ low.rotate_left(32))
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random index in range [0, bound)
    ///
    /// # Panics
    /// Panics if bound == 0
    ///
    /// # Example
    /// ```
    /// use secret_draw_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let j = rng.below(5);
    /// assert!(j < 5);
    /// ```
    pub fn below(&mut self, bound: usize) -> usize {
        RandomSource::below(self, bound)
    }

    /// Get current RNG state (for replay)
    ///
    /// # Example
    /// ```
    /// use secret_draw_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// # let _ = rng2;
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl RandomSource for RngManager {
    fn next_u64(&mut self) -> u64 {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "bound must be positive")]
    fn test_below_zero_bound() {
        let mut rng = RngManager::new(12345);
        rng.below(0);
    }

    #[test]
    fn test_below_in_range() {
        let mut rng = RngManager::new(12345);

        for bound in 1..50 {
            let val = rng.below(bound);
            assert!(val < bound, "below({}) produced {}", bound, val);
        }
    }

    #[test]
    fn test_below_one_is_always_zero() {
        let mut rng = RngManager::new(777);
        for _ in 0..100 {
            assert_eq!(rng.below(1), 0);
        }
    }

    #[test]
    fn test_from_entropy_nonzero_state() {
        let rng = RngManager::from_entropy();
        assert_ne!(rng.get_state(), 0);
    }

    #[test]
    fn test_mutable_reference_is_a_source() {
        fn take_three<R: RandomSource>(mut source: R) -> [u64; 3] {
            [source.next_u64(), source.next_u64(), source.next_u64()]
        }

        let mut rng1 = RngManager::new(99999);
        let mut rng2 = RngManager::new(99999);

        let borrowed = take_three(&mut rng2);
        assert_eq!(borrowed, [rng1.next(), rng1.next(), rng1.next()]);
        assert_eq!(rng1.get_state(), rng2.get_state());
    }
}
