//! People repository.
//!
//! The two storage-facing steps of a submission live here: the duplicate check and the record
//! write. Both delegate to an injected [`PersonStore`]; this module adds no locking or caching of
//! its own.
//!
//! ## Pure Data Operations
//!
//! Nothing in this module knows about forms, HTML or HTTP. Rendering belongs in
//! [`crate::render`] and the listener in `api-rest`.

use crate::error::PersistenceResult;
use crate::record::{PersonDraft, PersonRecord};
use crate::store::PersonStore;
use crate::validation::ValidatedPerson;
use intake_types::IdNumber;
use std::sync::Arc;

// ============================================================================
// PEOPLE REPOSITORY
// ============================================================================

/// Duplicate checker and record writer over one store.
#[derive(Clone)]
pub struct PeopleRepository {
    store: Arc<dyn PersonStore>,
}

impl PeopleRepository {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    /// Reports whether a record with `id_number` is already stored.
    ///
    /// # Errors
    ///
    /// A failed query is returned as an error, never as `false`.
    pub fn exists(&self, id_number: &IdNumber) -> PersistenceResult<bool> {
        Ok(self.store.find_by_id_number(id_number)?.is_some())
    }

    /// Builds the draft for `person` and issues exactly one insert.
    ///
    /// The store assigns the record id. There are no retries.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged, including
    /// [`PersistenceError::DuplicateIdNumber`](crate::error::PersistenceError::DuplicateIdNumber)
    /// when another writer claimed the ID number after [`exists`](Self::exists) ran.
    pub fn write(&self, person: ValidatedPerson) -> PersistenceResult<PersonRecord> {
        self.store.insert(PersonDraft::from(person))
    }

    /// Looks a stored record up by its ID number.
    pub fn find(&self, id_number: &IdNumber) -> PersistenceResult<Option<PersonRecord>> {
        self.store.find_by_id_number(id_number)
    }
}
