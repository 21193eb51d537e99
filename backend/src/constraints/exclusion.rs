//! Exclusion index and input validation
//!
//! The index maps each giver to the set of receivers they may not draw.
//! Input pairs are checked against the roster by [`validate_input`] before
//! the index is built; the index itself trusts what it is given.

use crate::models::ParticipantId;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Malformed roster or exclusion data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("participant {0} cannot block themselves")]
    SelfExclusion(ParticipantId),

    #[error("exclusion references {0}, who is not a participant")]
    UnknownParticipant(ParticipantId),
}

/// Directed giver → blocked receivers relation
///
/// # Example
///
/// ```rust
/// use secret_draw_core_rs::constraints::ExclusionSet;
///
/// let exclusions = ExclusionSet::build(vec![("ana".into(), "bruno".into())]);
/// assert!(exclusions.is_excluded(&"ana".into(), &"bruno".into()));
/// assert!(!exclusions.is_excluded(&"bruno".into(), &"ana".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    blocked: HashMap<ParticipantId, HashSet<ParticipantId>>,
}

impl ExclusionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index (blocker, blocked) pairs; repeated pairs collapse
    pub fn build<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ParticipantId, ParticipantId)>,
    {
        let mut blocked: HashMap<ParticipantId, HashSet<ParticipantId>> = HashMap::new();
        for (blocker, target) in pairs {
            blocked.entry(blocker).or_default().insert(target);
        }
        Self { blocked }
    }

    pub fn is_excluded(&self, giver: &ParticipantId, receiver: &ParticipantId) -> bool {
        self.blocked
            .get(giver)
            .is_some_and(|targets| targets.contains(receiver))
    }

    /// Receivers `giver` may not be assigned
    pub fn blocked_by(&self, giver: &ParticipantId) -> impl Iterator<Item = &ParticipantId> {
        self.blocked.get(giver).into_iter().flatten()
    }

    /// Number of distinct directed pairs
    pub fn len(&self) -> usize {
        self.blocked.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All pairs, sorted for stable output
    pub fn sorted_pairs(&self) -> Vec<(&ParticipantId, &ParticipantId)> {
        let mut pairs: Vec<_> = self
            .blocked
            .iter()
            .flat_map(|(giver, targets)| targets.iter().map(move |r| (giver, r)))
            .collect();
        pairs.sort();
        pairs
    }
}

/// Reject duplicate participants, self-blocks and unknown ids
pub fn validate_input(
    participants: &[ParticipantId],
    pairs: &[(ParticipantId, ParticipantId)],
) -> Result<(), InputError> {
    let mut roster = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !roster.insert(participant) {
            return Err(InputError::DuplicateParticipant(participant.clone()));
        }
    }

    for (blocker, blocked) in pairs {
        if blocker == blocked {
            return Err(InputError::SelfExclusion(blocker.clone()));
        }
        for id in [blocker, blocked] {
            if !roster.contains(id) {
                return Err(InputError::UnknownParticipant(id.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> (ParticipantId, ParticipantId) {
        (a.into(), b.into())
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let set = ExclusionSet::build(vec![pair("A", "B"), pair("A", "B"), pair("A", "C")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.blocked_by(&"A".into()).count(), 2);
        assert_eq!(set.blocked_by(&"B".into()).count(), 0);
    }

    #[test]
    fn test_sorted_pairs_are_stable() {
        let set = ExclusionSet::build(vec![pair("C", "A"), pair("A", "C"), pair("A", "B")]);
        let rendered: Vec<String> = set
            .sorted_pairs()
            .into_iter()
            .map(|(g, r)| format!("{}>{}", g, r))
            .collect();
        assert_eq!(rendered, vec!["A>B", "A>C", "C>A"]);
    }

    #[test]
    fn test_validate_rejects_self_exclusion() {
        let participants: Vec<ParticipantId> = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(
            validate_input(&participants, &[pair("B", "B")]),
            Err(InputError::SelfExclusion("B".into()))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_blocked() {
        let participants: Vec<ParticipantId> = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(
            validate_input(&participants, &[pair("A", "Z")]),
            Err(InputError::UnknownParticipant("Z".into()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_participant() {
        let participants: Vec<ParticipantId> = vec!["A".into(), "B".into(), "A".into()];
        assert_eq!(
            validate_input(&participants, &[]),
            Err(InputError::DuplicateParticipant("A".into()))
        );
    }
}
