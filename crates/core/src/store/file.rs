//! File-backed person store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   people/
//!     <s1>/
//!       <s2>/
//!         <uuid>/
//!           person.yaml     # see `document` for the format
//!     index/
//!       <id_number>         # contains the owning record's uuid
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record uuid.
//!
//! ## Uniqueness
//!
//! An insert writes the document first and then claims the index entry for its ID number by
//! hard-linking a staged file into place. `link(2)` fails if the target exists, so exactly one
//! of several concurrent inserts for the same ID number can win, across threads and processes.
//! The losers remove the document they wrote and report
//! [`PersistenceError::DuplicateIdNumber`]. Because the entry only appears once its content is
//! complete, a reader never sees a half-written index entry.

use super::PersonStore;
use crate::document::PersonDocument;
use crate::error::{PersistenceError, PersistenceResult};
use crate::paths::{index_dir, index_entry, people_dir, PersonFile};
use crate::record::{PersonDraft, PersonRecord};
use chrono::Utc;
use intake_types::IdNumber;
use intake_uuid::ShardableUuid;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// Nothing is touched on disk until the first insert.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn record_path(&self, id: &ShardableUuid) -> PathBuf {
        id.sharded_dir(&people_dir(&self.data_dir))
            .join(PersonFile::NAME)
    }

    /// Points the index entry for `id_number` at `id`, failing if it already exists.
    fn claim_index(&self, id_number: &IdNumber, id: &ShardableUuid) -> PersistenceResult<()> {
        let index_dir = index_dir(&self.data_dir);
        fs::create_dir_all(&index_dir).map_err(PersistenceError::StorageDirCreation)?;

        let staged = index_dir.join(format!(".{id}.tmp"));
        fs::write(&staged, id.to_string()).map_err(PersistenceError::IndexWrite)?;

        let linked = fs::hard_link(&staged, index_entry(&self.data_dir, id_number));

        if let Err(e) = fs::remove_file(&staged) {
            tracing::warn!("failed to remove staged index file {}: {}", staged.display(), e);
        }

        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(PersistenceError::DuplicateIdNumber)
            }
            Err(e) => Err(PersistenceError::IndexWrite(e)),
        }
    }
}

impl PersonStore for FileStore {
    fn find_by_id_number(&self, id_number: &IdNumber) -> PersistenceResult<Option<PersonRecord>> {
        let entry = index_entry(&self.data_dir, id_number);
        let contents = match fs::read_to_string(&entry) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::IndexRead(e)),
        };

        let corrupt = |reason: String| PersistenceError::CorruptIndex {
            id_number: id_number.to_string(),
            reason,
        };

        let id = ShardableUuid::parse(contents.trim()).map_err(|e| corrupt(e.to_string()))?;
        let yaml = fs::read_to_string(self.record_path(&id)).map_err(PersistenceError::FileRead)?;
        let record = PersonDocument::parse(&yaml)?;

        if record.id != id || record.id_number != *id_number {
            return Err(corrupt(format!(
                "entry points at record {} holding ID number {}",
                record.id, record.id_number
            )));
        }

        Ok(Some(record))
    }

    fn insert(&self, draft: PersonDraft) -> PersistenceResult<PersonRecord> {
        let record = PersonRecord::from_draft(ShardableUuid::new(), draft, Utc::now());
        let yaml = PersonDocument::render(&record)?;

        let record_dir = record.id.sharded_dir(&people_dir(&self.data_dir));
        fs::create_dir_all(&record_dir).map_err(PersistenceError::StorageDirCreation)?;

        let written = fs::write(record_dir.join(PersonFile::NAME), yaml)
            .map_err(PersistenceError::FileWrite)
            .and_then(|()| self.claim_index(&record.id_number, &record.id));

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_dir_all(&record_dir) {
                tracing::warn!(
                    "failed to remove record directory {} after failed insert: {}",
                    record_dir.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        tracing::debug!("stored person record {}", record.id);
        Ok(record)
    }
}
