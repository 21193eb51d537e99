//! Arrangements and the assignments derived from them
//!
//! An [`Arrangement`] is working state: an ordering of every participant in
//! which position `i` gives to position `(i + 1) mod n`. Deriving
//! assignments from adjacency is what makes every accepted result a single
//! n-cycle; two disjoint smaller cycles cannot be expressed this way.
//!
//! # Critical Invariants (accepted results)
//!
//! 1. Exactly n assignments for n participants
//! 2. Every participant gives once and receives once
//! 3. Nobody gives to themselves
//! 4. No (giver, receiver) pair is excluded
//! 5. Following receivers from anyone visits all n before returning

use crate::constraints::ExclusionSet;
use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Ordered permutation of the participants, used during generation and repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    order: Vec<ParticipantId>,
}

impl Arrangement {
    pub fn new(order: Vec<ParticipantId>) -> Self {
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&ParticipantId> {
        self.order.get(i)
    }

    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.order
    }

    pub fn into_order(self) -> Vec<ParticipantId> {
        self.order
    }

    /// Position receiving from position `i` (wraps at the end)
    pub fn successor_index(&self, i: usize) -> usize {
        (i + 1) % self.order.len()
    }

    /// Giver and receiver at position `i`
    pub fn pair_at(&self, i: usize) -> (&ParticipantId, &ParticipantId) {
        (&self.order[i], &self.order[self.successor_index(i)])
    }

    /// Adjacent (position, giver, receiver) triples, including the wrap-around
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &ParticipantId, &ParticipantId)> + '_ {
        (0..self.order.len()).map(move |i| {
            let (giver, receiver) = self.pair_at(i);
            (i, giver, receiver)
        })
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
    }

    /// Derive one assignment per position
    pub fn to_result(&self) -> DrawResult {
        let assignments = self
            .pairs()
            .map(|(_, giver, receiver)| Assignment::new(giver.clone(), receiver.clone()))
            .collect();
        DrawResult { assignments }
    }
}

/// One giver paired with their secret recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

impl Assignment {
    pub fn new(giver: ParticipantId, receiver: ParticipantId) -> Self {
        Self { giver, receiver }
    }
}

/// Complete set of assignments accepted for one draw
///
/// Order carries no meaning; the result is a set even though it is
/// produced from an ordered arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawResult {
    assignments: Vec<Assignment>,
}

/// Ways a candidate result can break the draw invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("expected {expected} assignments, found {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("{0} is assigned to themselves")]
    SelfAssignment(ParticipantId),

    #[error("{0} is not a participant of this draw")]
    UnknownParticipant(ParticipantId),

    #[error("{0} gives more than once")]
    DuplicateGiver(ParticipantId),

    #[error("{0} receives more than once")]
    DuplicateReceiver(ParticipantId),

    #[error("{giver} may not give to {receiver}")]
    ExcludedPair {
        giver: ParticipantId,
        receiver: ParticipantId,
    },

    #[error("assignments split into more than one cycle")]
    BrokenCycle,
}

impl DrawResult {
    /// Wrap assignments obtained elsewhere (e.g. a stored record)
    ///
    /// No checking happens here; call [`DrawResult::verify`].
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    pub fn receiver_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments
            .iter()
            .find(|a| &a.giver == giver)
            .map(|a| &a.receiver)
    }

    pub fn givers(&self) -> impl Iterator<Item = &ParticipantId> {
        self.assignments.iter().map(|a| &a.giver)
    }

    pub fn receivers(&self) -> impl Iterator<Item = &ParticipantId> {
        self.assignments.iter().map(|a| &a.receiver)
    }

    /// True when following receivers from any giver visits everyone once
    pub fn is_single_cycle(&self) -> bool {
        let next: HashMap<&ParticipantId, &ParticipantId> = self
            .assignments
            .iter()
            .map(|a| (&a.giver, &a.receiver))
            .collect();

        let n = self.assignments.len();
        if n == 0 || next.len() != n {
            return false;
        }

        let start = &self.assignments[0].giver;
        let mut current = start;
        let mut visited = HashSet::with_capacity(n);

        for _ in 0..n {
            if !visited.insert(current) {
                return false;
            }
            current = match next.get(current) {
                Some(receiver) => *receiver,
                None => return false,
            };
        }

        current == start && visited.len() == n
    }

    /// Check every invariant of an accepted draw
    ///
    /// Returns the first violation found.
    pub fn verify(
        &self,
        participants: &[ParticipantId],
        exclusions: &ExclusionSet,
    ) -> Result<(), InvariantViolation> {
        if self.assignments.len() != participants.len() {
            return Err(InvariantViolation::CountMismatch {
                expected: participants.len(),
                actual: self.assignments.len(),
            });
        }

        let known: HashSet<&ParticipantId> = participants.iter().collect();
        let mut givers = HashSet::with_capacity(participants.len());
        let mut receivers = HashSet::with_capacity(participants.len());

        for assignment in &self.assignments {
            let Assignment { giver, receiver } = assignment;

            if giver == receiver {
                return Err(InvariantViolation::SelfAssignment(giver.clone()));
            }
            for id in [giver, receiver] {
                if !known.contains(id) {
                    return Err(InvariantViolation::UnknownParticipant(id.clone()));
                }
            }
            if !givers.insert(giver) {
                return Err(InvariantViolation::DuplicateGiver(giver.clone()));
            }
            if !receivers.insert(receiver) {
                return Err(InvariantViolation::DuplicateReceiver(receiver.clone()));
            }
            if exclusions.is_excluded(giver, receiver) {
                return Err(InvariantViolation::ExcludedPair {
                    giver: giver.clone(),
                    receiver: receiver.clone(),
                });
            }
        }

        if !self.is_single_cycle() {
            return Err(InvariantViolation::BrokenCycle);
        }

        Ok(())
    }
}
