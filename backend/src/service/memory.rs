//! In-memory collaborators
//!
//! `InMemoryDrawStore` holds records behind a mutex so exclusivity holds
//! across threads. `StaticDirectory` serves fixed rosters and exclusions.

use crate::models::{GroupId, ParticipantId};
use crate::orchestrator::DrawRecord;
use crate::service::providers::{DrawStore, ExclusionProvider, RosterProvider, StoreError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct InMemoryDrawStore {
    records: Mutex<HashMap<GroupId, DrawRecord>>,
}

impl InMemoryDrawStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GroupId, DrawRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Backend("draw store lock poisoned".to_string()))
    }
}

impl DrawStore for InMemoryDrawStore {
    fn exists(&self, group: &GroupId) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(group))
    }

    fn insert_exclusive(&self, record: DrawRecord) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        match records.entry(record.group_id.clone()) {
            Entry::Occupied(existing) => Err(StoreError::AlreadyExists {
                group_id: existing.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn find(&self, group: &GroupId) -> Result<Option<DrawRecord>, StoreError> {
        Ok(self.lock()?.get(group).cloned())
    }

    fn delete(&self, group: &GroupId) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(group).is_some())
    }
}

#[derive(Debug, Clone, Default)]
struct GroupEntry {
    participants: Vec<ParticipantId>,
    exclusions: Vec<(ParticipantId, ParticipantId)>,
}

/// Fixed set of groups, each with a roster and exclusion list
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    groups: HashMap<GroupId, GroupEntry>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(
        mut self,
        group: impl Into<GroupId>,
        participants: Vec<ParticipantId>,
        exclusions: Vec<(ParticipantId, ParticipantId)>,
    ) -> Self {
        self.groups.insert(
            group.into(),
            GroupEntry {
                participants,
                exclusions,
            },
        );
        self
    }
}

impl RosterProvider for StaticDirectory {
    fn roster(&self, group: &GroupId) -> Option<Vec<ParticipantId>> {
        self.groups.get(group).map(|g| g.participants.clone())
    }
}

impl ExclusionProvider for StaticDirectory {
    fn exclusions(&self, group: &GroupId) -> Vec<(ParticipantId, ParticipantId)> {
        self.groups
            .get(group)
            .map(|g| g.exclusions.clone())
            .unwrap_or_default()
    }
}
