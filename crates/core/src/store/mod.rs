//! Person persistence.
//!
//! The pipeline only ever talks to a [`PersonStore`]: a single-key lookup by ID number and a
//! single-document insert. Implementations:
//!
//! - [`FileStore`]: YAML documents in a sharded directory tree, with an ID number index.
//! - [`InMemoryStore`]: a locked map, for tests and throwaway runs.
//!
//! Both enforce ID number uniqueness inside `insert` itself, so a uniqueness violation is
//! reported as [`DuplicateIdNumber`] even when two submissions race past the pipeline's
//! duplicate check.
//!
//! [`DuplicateIdNumber`]: crate::error::PersistenceError::DuplicateIdNumber

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use crate::config::{CoreConfig, StoreKind};
use crate::error::PersistenceResult;
use crate::record::{PersonDraft, PersonRecord};
use intake_types::IdNumber;
use std::sync::Arc;

/// Persistence collaborator used by the submission pipeline.
pub trait PersonStore: Send + Sync {
    /// Looks up the record with exactly this ID number.
    ///
    /// # Errors
    ///
    /// Any error means the store could not answer. Callers must not treat it as "absent".
    fn find_by_id_number(&self, id_number: &IdNumber) -> PersistenceResult<Option<PersonRecord>>;

    /// Inserts one record and returns it with its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::DuplicateIdNumber`] if a record with the same ID number
    /// already exists; any other error is an infrastructure failure.
    ///
    /// [`PersistenceError::DuplicateIdNumber`]: crate::error::PersistenceError::DuplicateIdNumber
    fn insert(&self, draft: PersonDraft) -> PersistenceResult<PersonRecord>;
}

/// Opens the store selected by `cfg`.
pub fn open(cfg: &CoreConfig) -> Arc<dyn PersonStore> {
    match cfg.store_kind() {
        StoreKind::File => Arc::new(FileStore::new(cfg.data_dir().to_path_buf())),
        StoreKind::Memory => Arc::new(InMemoryStore::new()),
    }
}
