//! Cycle Validator
//!
//! Walks positions 0..n−1, pairing each participant with the next one
//! (wrapping), and stops at the first excluded pair. Validity is binary, so
//! a doomed scan is never finished and no partial output is produced.

use crate::constraints::ExclusionSet;
use crate::models::{Arrangement, DrawResult, ParticipantId};

/// First excluded adjacency found in an arrangement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleViolation {
    /// Position of the giver in the arrangement
    pub position: usize,
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

/// Position of the first excluded (giver, receiver) adjacency, if any
pub fn first_violation(arrangement: &Arrangement, exclusions: &ExclusionSet) -> Option<usize> {
    arrangement
        .pairs()
        .find(|(_, giver, receiver)| exclusions.is_excluded(giver, receiver))
        .map(|(i, _, _)| i)
}

pub fn is_valid(arrangement: &Arrangement, exclusions: &ExclusionSet) -> bool {
    first_violation(arrangement, exclusions).is_none()
}

/// Derive the draw result, or report where the cycle breaks
pub fn validate(
    arrangement: &Arrangement,
    exclusions: &ExclusionSet,
) -> Result<DrawResult, CycleViolation> {
    match first_violation(arrangement, exclusions) {
        None => Ok(arrangement.to_result()),
        Some(position) => {
            let (giver, receiver) = arrangement.pair_at(position);
            Err(CycleViolation {
                position,
                giver: giver.clone(),
                receiver: receiver.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrangement(names: &[&str]) -> Arrangement {
        Arrangement::new(names.iter().map(|n| ParticipantId::from(*n)).collect())
    }

    #[test]
    fn test_reports_first_violation_only() {
        let exclusions = ExclusionSet::build(vec![
            ("B".into(), "C".into()),
            ("C".into(), "D".into()),
        ]);
        let violation = validate(&arrangement(&["A", "B", "C", "D"]), &exclusions).unwrap_err();
        assert_eq!(violation.position, 1);
        assert_eq!(violation.giver.as_str(), "B");
        assert_eq!(violation.receiver.as_str(), "C");
    }

    #[test]
    fn test_wrap_around_pair_checked() {
        let exclusions = ExclusionSet::build(vec![("D".into(), "A".into())]);
        assert_eq!(
            first_violation(&arrangement(&["A", "B", "C", "D"]), &exclusions),
            Some(3)
        );
    }

    #[test]
    fn test_reverse_block_does_not_reject() {
        let exclusions = ExclusionSet::build(vec![("B".into(), "A".into())]);
        assert!(is_valid(&arrangement(&["A", "B", "C"]), &exclusions));
    }
}
