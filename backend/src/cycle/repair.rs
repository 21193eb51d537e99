//! Swap Repair Engine
//!
//! Local search used when reshuffling alone keeps failing. Each round:
//!
//! ```text
//! 1. Find the first excluded adjacency (giver at i, receiver at i+1 mod n)
//! 2. None found → arrangement is valid, done
//! 3. Otherwise, for every j ∉ {i, i+1 mod n}:
//!      swap(i+1 mod n, j); if the WHOLE cycle is now valid → done
//!      else undo the swap
//! 4. No j worked → next round, on the unchanged arrangement
//! ```
//!
//! Rounds are bounded by n². A failed round leaves the arrangement exactly as
//! it was, so the following round rediscovers the same violation and repeats
//! the same search. Rounds after the first therefore cannot find anything new;
//! the bound is kept as-is rather than turned into a perturbing search.

use crate::constraints::ExclusionSet;
use crate::cycle::validator::{first_violation, is_valid};
use crate::models::Arrangement;
use thiserror::Error;
use tracing::trace;

/// Repaired arrangement plus the round it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairSuccess {
    pub arrangement: Arrangement,
    /// 1-based round in which the arrangement became valid
    pub rounds: usize,
}

/// Swap repair exhausted its round budget
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("swap repair gave up after {rounds} rounds")]
pub struct RepairFailed {
    pub rounds: usize,
}

/// Bounded pairwise-swap repair
#[derive(Debug, Clone, Default)]
pub struct SwapRepair {
    max_rounds: Option<usize>,
}

impl SwapRepair {
    /// Repair bounded by n² rounds for an arrangement of n participants
    pub fn new() -> Self {
        Self { max_rounds: None }
    }

    /// Repair with an explicit round bound instead of n²
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds: Some(max_rounds),
        }
    }

    pub fn round_limit(&self, n: usize) -> usize {
        self.max_rounds.unwrap_or(n * n).max(1)
    }

    /// Try to turn `arrangement` into a fully valid cycle by swaps
    pub fn repair(
        &self,
        mut arrangement: Arrangement,
        exclusions: &ExclusionSet,
    ) -> Result<RepairSuccess, RepairFailed> {
        let n = arrangement.len();
        let limit = self.round_limit(n);

        for round in 1..=limit {
            let Some(i) = first_violation(&arrangement, exclusions) else {
                return Ok(RepairSuccess {
                    arrangement,
                    rounds: round,
                });
            };

            let target = arrangement.successor_index(i);
            for j in 0..n {
                if j == i || j == target {
                    continue;
                }

                arrangement.swap(target, j);
                if is_valid(&arrangement, exclusions) {
                    trace!(round, position = i, swapped_with = j, "swap cleared violation");
                    return Ok(RepairSuccess {
                        arrangement,
                        rounds: round,
                    });
                }
                arrangement.swap(target, j);
            }
        }

        Err(RepairFailed { rounds: limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantId;

    fn arrangement(names: &[&str]) -> Arrangement {
        Arrangement::new(names.iter().map(|n| ParticipantId::from(*n)).collect())
    }

    fn blocks(pairs: &[(&str, &str)]) -> ExclusionSet {
        ExclusionSet::build(pairs.iter().map(|(a, b)| ((*a).into(), (*b).into())))
    }

    #[test]
    fn test_valid_arrangement_returned_in_first_round() {
        let input = arrangement(&["A", "B", "C", "D"]);
        let success = SwapRepair::new().repair(input.clone(), &ExclusionSet::empty()).unwrap();
        assert_eq!(success.arrangement, input);
        assert_eq!(success.rounds, 1);
    }

    #[test]
    fn test_single_swap_fixes_violation() {
        // A→B blocked; swapping B (position 1) with C (position 2) gives A→C→B→D→A
        let exclusions = blocks(&[("A", "B")]);
        let success = SwapRepair::new()
            .repair(arrangement(&["A", "B", "C", "D"]), &exclusions)
            .unwrap();

        assert_eq!(success.rounds, 1);
        assert_eq!(success.arrangement, arrangement(&["A", "C", "B", "D"]));
    }

    #[test]
    fn test_gives_up_when_giver_is_fully_blocked() {
        let exclusions = blocks(&[("A", "B"), ("A", "C")]);
        let failure = SwapRepair::new()
            .repair(arrangement(&["A", "B", "C"]), &exclusions)
            .unwrap_err();
        assert_eq!(failure.rounds, 9);
    }

    #[test]
    fn test_explicit_round_limit() {
        let exclusions = blocks(&[("A", "B"), ("A", "C"), ("A", "D")]);
        let failure = SwapRepair::with_max_rounds(2)
            .repair(arrangement(&["A", "B", "C", "D"]), &exclusions)
            .unwrap_err();
        assert_eq!(failure, RepairFailed { rounds: 2 });
    }
}
