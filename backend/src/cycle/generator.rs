//! Cyclic Arrangement Generator
//!
//! Draws one of the n! orderings uniformly: for i from n−1 down to 1, swap
//! position i with a position chosen uniformly from [0, i]. Each call is
//! independent; the only carried state lives in the caller's RNG.

use crate::models::{Arrangement, ParticipantId};
use crate::rng::RandomSource;

/// Uniformly random permutation of `participants`
pub fn shuffle<R: RandomSource + ?Sized>(participants: &[ParticipantId], rng: &mut R) -> Arrangement {
    let mut order = participants.to_vec();
    for i in (1..order.len()).rev() {
        let j = rng.below(i + 1);
        order.swap(i, j);
    }
    Arrangement::new(order)
}
