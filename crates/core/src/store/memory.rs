use super::PersonStore;
use crate::error::{PersistenceError, PersistenceResult};
use crate::record::{PersonDraft, PersonRecord};
use chrono::Utc;
use intake_types::IdNumber;
use intake_uuid::ShardableUuid;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local store keyed by ID number.
///
/// `insert` checks for an existing entry and writes under the same write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<IdNumber, PersonRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> PersistenceResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> PersistenceResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl PersonStore for InMemoryStore {
    fn find_by_id_number(&self, id_number: &IdNumber) -> PersistenceResult<Option<PersonRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(records.get(id_number).cloned())
    }

    fn insert(&self, draft: PersonDraft) -> PersistenceResult<PersonRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?;

        if records.contains_key(&draft.id_number) {
            return Err(PersistenceError::DuplicateIdNumber);
        }

        let record = PersonRecord::from_draft(ShardableUuid::new(), draft, Utc::now());
        records.insert(record.id_number.clone(), record.clone());
        Ok(record)
    }
}
