//! Draw Record - persistable form of an accepted draw
//!
//! A record ties the assignments to the exact input they were drawn from,
//! so a stored draw can be re-checked later.
//!
//! # Critical Invariants
//!
//! - **Input matching**: the fingerprint must match the roster and
//!   exclusions the record is validated against
//! - **Draw invariants**: the stored assignments still form one valid cycle

use crate::constraints::ExclusionSet;
use crate::models::{Assignment, DrawResult, GroupId, InvariantViolation, ParticipantId};
use crate::orchestrator::engine::DrawOutcome;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors building or checking a record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("fingerprint serialization failed: {0}")]
    Serialization(String),

    #[error("record was drawn from different input (expected {expected}, got {actual})")]
    FingerprintMismatch { expected: String, actual: String },

    #[error("stored assignments are invalid: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Accepted draw as handed to persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Unique id for this draw (UUID v4)
    pub draw_id: String,

    pub group_id: GroupId,

    pub assignments: Vec<Assignment>,

    /// Generation attempt on which the draw was accepted
    pub attempts: usize,

    /// SHA256 of the canonical roster + exclusion input
    pub input_fingerprint: String,
}

impl DrawRecord {
    pub fn new(
        group_id: GroupId,
        outcome: &DrawOutcome,
        participants: &[ParticipantId],
        exclusions: &[(ParticipantId, ParticipantId)],
    ) -> Result<Self, RecordError> {
        Ok(Self {
            draw_id: uuid::Uuid::new_v4().to_string(),
            group_id,
            assignments: outcome.result.assignments().to_vec(),
            attempts: outcome.attempts,
            input_fingerprint: compute_input_fingerprint(participants, exclusions)?,
        })
    }

    pub fn result(&self) -> DrawResult {
        DrawResult::from_assignments(self.assignments.clone())
    }

    pub fn receiver_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments
            .iter()
            .find(|a| &a.giver == giver)
            .map(|a| &a.receiver)
    }
}

// ============================================================================
// Input Fingerprint
// ============================================================================

#[derive(Serialize)]
struct CanonicalInput<'a> {
    participants: Vec<&'a ParticipantId>,
    exclusions: Vec<(&'a ParticipantId, &'a ParticipantId)>,
}

/// Compute deterministic SHA256 hash of the draw input
///
/// Participants and pairs are sorted (and pairs deduplicated) first, so
/// the hash does not depend on the order the collaborators returned them.
pub fn compute_input_fingerprint(
    participants: &[ParticipantId],
    exclusions: &[(ParticipantId, ParticipantId)],
) -> Result<String, RecordError> {
    let mut sorted_participants: Vec<&ParticipantId> = participants.iter().collect();
    sorted_participants.sort();

    let mut sorted_pairs: Vec<(&ParticipantId, &ParticipantId)> =
        exclusions.iter().map(|(a, b)| (a, b)).collect();
    sorted_pairs.sort();
    sorted_pairs.dedup();

    let canonical = CanonicalInput {
        participants: sorted_participants,
        exclusions: sorted_pairs,
    };

    let json = serde_json::to_string(&canonical)
        .map_err(|e| RecordError::Serialization(format!("input serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a record against the input it claims to come from
///
/// Checks the fingerprint first, then every draw invariant.
pub fn validate_record(
    record: &DrawRecord,
    participants: &[ParticipantId],
    exclusions: &[(ParticipantId, ParticipantId)],
) -> Result<(), RecordError> {
    let expected = compute_input_fingerprint(participants, exclusions)?;
    if record.input_fingerprint != expected {
        return Err(RecordError::FingerprintMismatch {
            expected,
            actual: record.input_fingerprint.clone(),
        });
    }

    let exclusion_set = ExclusionSet::build(exclusions.iter().cloned());
    record.result().verify(participants, &exclusion_set)?;

    Ok(())
}
