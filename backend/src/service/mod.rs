//! Draw Service
//!
//! Group-level operations on top of the engine: run a group's draw and
//! persist it, look up one member's recipient, list or reset a draw.
//! Who may call these is decided before they are reached; nothing here
//! checks permissions.
//!
//! # Example
//!
//! ```rust
//! use secret_draw_core_rs::orchestrator::DrawConfig;
//! use secret_draw_core_rs::service::{DrawService, InMemoryDrawStore, StaticDirectory};
//! use secret_draw_core_rs::RngManager;
//!
//! let directory = StaticDirectory::new().with_group(
//!     "office",
//!     vec!["ana".into(), "bruno".into(), "carla".into()],
//!     vec![("ana".into(), "bruno".into())],
//! );
//! let service = DrawService::new(
//!     directory.clone(),
//!     directory,
//!     InMemoryDrawStore::new(),
//!     DrawConfig::default(),
//! )
//! .unwrap();
//!
//! let record = service.execute_draw(&"office".into(), &mut RngManager::new(9)).unwrap();
//! assert_eq!(record.assignments.len(), 3);
//! assert_eq!(
//!     service.receiver_for(&"office".into(), &"ana".into()).unwrap().as_str(),
//!     "carla"
//! );
//! ```

pub mod memory;
pub mod providers;

pub use memory::{InMemoryDrawStore, StaticDirectory};
pub use providers::{DrawStore, ExclusionProvider, RosterProvider, StoreError};

use crate::models::{Assignment, GroupId, ParticipantId};
use crate::orchestrator::{
    validate_record, DrawConfig, DrawError, DrawOrchestrator, DrawRecord, RecordError,
};
use crate::rng::RandomSource;
use thiserror::Error;
use tracing::info;

/// Errors from group-level draw operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("a draw already exists for group {0}; reset it first")]
    DrawAlreadyExists(GroupId),

    #[error("no draw has been made for group {0}")]
    DrawNotFound(GroupId),

    #[error("{participant} is not a member of group {group}")]
    NotAMember {
        group: GroupId,
        participant: ParticipantId,
    },

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Draw operations wired to roster, exclusion and persistence collaborators
pub struct DrawService<R, E, S> {
    roster: R,
    exclusions: E,
    store: S,
    orchestrator: DrawOrchestrator,
}

impl<R, E, S> DrawService<R, E, S>
where
    R: RosterProvider,
    E: ExclusionProvider,
    S: DrawStore,
{
    pub fn new(roster: R, exclusions: E, store: S, config: DrawConfig) -> Result<Self, DrawError> {
        Ok(Self {
            roster,
            exclusions,
            store,
            orchestrator: DrawOrchestrator::new(config)?,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run and persist the group's draw
    ///
    /// Fails with `DrawAlreadyExists` both when a draw is found up front and
    /// when a concurrent draw wins the exclusive insert.
    pub fn execute_draw<G: RandomSource + ?Sized>(
        &self,
        group: &GroupId,
        rng: &mut G,
    ) -> Result<DrawRecord, ServiceError> {
        let participants = self.members(group)?;

        if self.store.exists(group)? {
            return Err(ServiceError::DrawAlreadyExists(group.clone()));
        }

        let exclusions = self.exclusions.exclusions(group);
        info!(
            group = %group,
            participants = participants.len(),
            exclusions = exclusions.len(),
            "executing draw"
        );

        let outcome = self.orchestrator.run(&participants, &exclusions, rng)?;
        let record = DrawRecord::new(group.clone(), &outcome, &participants, &exclusions)?;
        validate_record(&record, &participants, &exclusions)?;

        self.store
            .insert_exclusive(record.clone())
            .map_err(|e| match e {
                StoreError::AlreadyExists { group_id } => ServiceError::DrawAlreadyExists(group_id),
                other => ServiceError::Store(other),
            })?;

        info!(
            group = %group,
            draw_id = %record.draw_id,
            pairs = record.assignments.len(),
            "draw completed"
        );
        Ok(record)
    }

    /// The recipient drawn for `giver`
    pub fn receiver_for(
        &self,
        group: &GroupId,
        giver: &ParticipantId,
    ) -> Result<ParticipantId, ServiceError> {
        let participants = self.members(group)?;
        if !participants.contains(giver) {
            return Err(ServiceError::NotAMember {
                group: group.clone(),
                participant: giver.clone(),
            });
        }

        let record = self.stored_draw(group)?;
        record
            .receiver_of(giver)
            .cloned()
            .ok_or_else(|| ServiceError::DrawNotFound(group.clone()))
    }

    /// Every assignment of the group's draw
    pub fn all_assignments(&self, group: &GroupId) -> Result<Vec<Assignment>, ServiceError> {
        self.members(group)?;
        Ok(self.stored_draw(group)?.assignments)
    }

    /// Delete the group's draw so it can be run again
    pub fn reset_draw(&self, group: &GroupId) -> Result<(), ServiceError> {
        self.members(group)?;
        if !self.store.delete(group)? {
            return Err(ServiceError::DrawNotFound(group.clone()));
        }
        info!(group = %group, "draw reset");
        Ok(())
    }

    fn members(&self, group: &GroupId) -> Result<Vec<ParticipantId>, ServiceError> {
        self.roster
            .roster(group)
            .ok_or_else(|| ServiceError::GroupNotFound(group.clone()))
    }

    fn stored_draw(&self, group: &GroupId) -> Result<DrawRecord, ServiceError> {
        self.store
            .find(group)?
            .ok_or_else(|| ServiceError::DrawNotFound(group.clone()))
    }
}
