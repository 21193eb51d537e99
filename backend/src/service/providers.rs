//! Collaborator seams around the draw engine
//!
//! The engine never fetches or stores anything itself. These traits name
//! exactly what it needs from the outside world.
//!
//! ## Exclusivity
//!
//! At most one draw may exist per group. The engine cannot enforce this:
//! two concurrent draws can both observe "no draw yet". A [`DrawStore`]
//! MUST therefore make the existence check and the write a single atomic
//! step in [`DrawStore::insert_exclusive`].

use crate::models::{GroupId, ParticipantId};
use crate::orchestrator::DrawRecord;
use thiserror::Error;

/// Errors returned by a DrawStore implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A draw for this group is already stored
    #[error("a draw already exists for group {group_id}")]
    AlreadyExists { group_id: GroupId },

    /// Backend-specific failure (connection, lock, serialization)
    #[error("draw store backend error: {0}")]
    Backend(String),
}

/// Current members of a group
pub trait RosterProvider {
    /// `None` when the group does not exist
    fn roster(&self, group: &GroupId) -> Option<Vec<ParticipantId>>;
}

/// Current blocked (blocker, blocked) pairs of a group
pub trait ExclusionProvider {
    fn exclusions(&self, group: &GroupId) -> Vec<(ParticipantId, ParticipantId)>;
}

/// Persistence sink for accepted draws
///
/// Implementations must be `Send + Sync` so one store can serve draws for
/// many groups from several threads.
pub trait DrawStore: Send + Sync {
    fn exists(&self, group: &GroupId) -> Result<bool, StoreError>;

    /// Store `record` unless its group already has one.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` otherwise. Check and write
    /// must be atomic with respect to other callers.
    fn insert_exclusive(&self, record: DrawRecord) -> Result<(), StoreError>;

    fn find(&self, group: &GroupId) -> Result<Option<DrawRecord>, StoreError>;

    /// Remove the group's draw; `Ok(false)` when there was none
    fn delete(&self, group: &GroupId) -> Result<bool, StoreError>;
}
