//! Submission pipeline.
//!
//! One run takes the four raw fields of a submission to exactly one [`PipelineOutcome`]:
//!
//! ```text
//! Validating ──fail──▶ Done(ValidationFailed)
//!     │
//!     ▼
//! CheckingDuplicate ──found──▶ Done(DuplicateFound)
//!     │            └─query error──▶ Done(PersistenceFailed)
//!     ▼
//! Writing ──ok──▶ Done(Success)
//!        ├─ID number taken──▶ Done(DuplicateFound)
//!        └─other error──▶ Done(PersistenceFailed)
//! ```
//!
//! The duplicate check and the insert are two separate store calls. A concurrent submission can
//! claim the ID number between them; the store rejects the second insert and the pipeline reports
//! it the same way as a duplicate found by the check.

use crate::error::PersistenceError;
use crate::record::PersonRecord;
use crate::repositories::people::PeopleRepository;
use crate::store::PersonStore;
use crate::validation::{validate, SubmittedFields, ValidatedPerson, ValidationError};
use std::sync::Arc;

/// Terminal result of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    ValidationFailed(ValidationError),
    DuplicateFound,
    PersistenceFailed(PersistenceError),
    Success(PersonRecord),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

enum Stage {
    Validating,
    CheckingDuplicate(ValidatedPerson),
    Writing(ValidatedPerson),
    Done(PipelineOutcome),
}

/// Runs submissions against one store. Holds no per-submission state.
#[derive(Clone)]
pub struct SubmissionPipeline {
    people: PeopleRepository,
}

impl SubmissionPipeline {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self {
            people: PeopleRepository::new(store),
        }
    }

    pub fn people(&self) -> &PeopleRepository {
        &self.people
    }

    pub fn run(&self, fields: &SubmittedFields) -> PipelineOutcome {
        let mut stage = Stage::Validating;
        loop {
            stage = match stage {
                Stage::Validating => match validate(fields) {
                    Ok(person) => Stage::CheckingDuplicate(person),
                    Err(reason) => Stage::Done(PipelineOutcome::ValidationFailed(reason)),
                },
                Stage::CheckingDuplicate(person) => match self.people.exists(&person.id_number) {
                    Ok(false) => Stage::Writing(person),
                    Ok(true) => Stage::Done(PipelineOutcome::DuplicateFound),
                    Err(e) => Stage::Done(PipelineOutcome::PersistenceFailed(e)),
                },
                Stage::Writing(person) => match self.people.write(person) {
                    Ok(record) => Stage::Done(PipelineOutcome::Success(record)),
                    Err(PersistenceError::DuplicateIdNumber) => {
                        Stage::Done(PipelineOutcome::DuplicateFound)
                    }
                    Err(e) => Stage::Done(PipelineOutcome::PersistenceFailed(e)),
                },
                Stage::Done(outcome) => {
                    log_outcome(&outcome);
                    return outcome;
                }
            };
        }
    }
}

fn log_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::ValidationFailed(reason) => {
            tracing::debug!("submission rejected: {}", reason);
        }
        PipelineOutcome::DuplicateFound => {
            tracing::warn!("submission rejected: ID number already stored");
        }
        PipelineOutcome::PersistenceFailed(e) => {
            tracing::error!("submission could not be stored: {:?}", e);
        }
        PipelineOutcome::Success(record) => {
            tracing::info!("stored person record {}", record.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceResult;
    use crate::record::PersonDraft;
    use crate::store::InMemoryStore;
    use intake_types::IdNumber;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alice_fields() -> SubmittedFields {
        SubmittedFields {
            name: "Alice".into(),
            surname: "Smith".into(),
            id_number: "1234567890123".into(),
            date_of_birth: "15/06/1990".into(),
        }
    }

    #[derive(Default)]
    struct CallCounts {
        finds: AtomicUsize,
        inserts: AtomicUsize,
    }

    /// Query or insert fails, depending on configuration.
    struct FailingStore {
        fail_find: bool,
        calls: CallCounts,
    }

    impl PersonStore for FailingStore {
        fn find_by_id_number(&self, _: &IdNumber) -> PersistenceResult<Option<PersonRecord>> {
            self.calls.finds.fetch_add(1, Ordering::SeqCst);
            if self.fail_find {
                Err(PersistenceError::Unavailable("timed out".into()))
            } else {
                Ok(None)
            }
        }

        fn insert(&self, _: PersonDraft) -> PersistenceResult<PersonRecord> {
            self.calls.inserts.fetch_add(1, Ordering::SeqCst);
            Err(PersistenceError::Unavailable("disk full".into()))
        }
    }

    /// Another writer always claims the ID number between check and insert.
    struct RacingStore;

    impl PersonStore for RacingStore {
        fn find_by_id_number(&self, _: &IdNumber) -> PersistenceResult<Option<PersonRecord>> {
            Ok(None)
        }

        fn insert(&self, _: PersonDraft) -> PersistenceResult<PersonRecord> {
            Err(PersistenceError::DuplicateIdNumber)
        }
    }

    #[test]
    fn test_alice_first_submission_succeeds_then_duplicates() {
        let store = Arc::new(InMemoryStore::new());
        let pipeline = SubmissionPipeline::new(store.clone());

        match pipeline.run(&alice_fields()) {
            PipelineOutcome::Success(record) => {
                assert_eq!(record.name.as_str(), "Alice");
                assert_eq!(record.surname.as_str(), "Smith");
                assert_eq!(record.id_number.as_str(), "1234567890123");
                assert_eq!(record.date_of_birth.to_string(), "15/06/1990");
            }
            other => panic!("expected success, got {other:?}"),
        }

        let second = pipeline.run(&alice_fields());
        assert!(
            matches!(second, PipelineOutcome::DuplicateFound),
            "got {second:?}"
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_stored_record_matches_submitted_fields() {
        let store = Arc::new(InMemoryStore::new());
        let pipeline = SubmissionPipeline::new(store.clone());
        let fields = SubmittedFields {
            name: " Alice ".into(),
            surname: "Smith\t".into(),
            date_of_birth: " 15/06/1990 ".into(),
            ..alice_fields()
        };

        assert!(pipeline.run(&fields).is_success());

        let id_number = IdNumber::parse(&fields.id_number).unwrap();
        let stored = store
            .find_by_id_number(&id_number)
            .expect("find should succeed")
            .expect("record should exist");
        assert_eq!(stored.name.as_str(), " Alice ");
        assert_eq!(stored.surname.as_str(), "Smith\t");
        assert_eq!(stored.id_number.as_str(), "1234567890123");
        assert_eq!(stored.date_of_birth.to_string(), "15/06/1990");
    }

    #[test]
    fn test_duplicate_differs_only_in_other_fields() {
        let store = Arc::new(InMemoryStore::new());
        let pipeline = SubmissionPipeline::new(store.clone());
        pipeline.run(&alice_fields());

        let other = SubmittedFields {
            name: "Bob".into(),
            surname: "Jones".into(),
            date_of_birth: "01/01/1970".into(),
            ..alice_fields()
        };
        assert!(matches!(
            pipeline.run(&other),
            PipelineOutcome::DuplicateFound
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_validation_failure_never_touches_store() {
        let store = Arc::new(FailingStore {
            fail_find: true,
            calls: CallCounts::default(),
        });
        let pipeline = SubmissionPipeline::new(store.clone());

        let fields = SubmittedFields {
            name: " ".into(),
            ..alice_fields()
        };
        assert!(matches!(
            pipeline.run(&fields),
            PipelineOutcome::ValidationFailed(ValidationError::NameRequired)
        ));
        assert_eq!(store.calls.finds.load(Ordering::SeqCst), 0);
        assert_eq!(store.calls.inserts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_query_failure_is_persistence_failure_without_insert() {
        let store = Arc::new(FailingStore {
            fail_find: true,
            calls: CallCounts::default(),
        });
        let pipeline = SubmissionPipeline::new(store.clone());

        assert!(matches!(
            pipeline.run(&alice_fields()),
            PipelineOutcome::PersistenceFailed(PersistenceError::Unavailable(_))
        ));
        assert_eq!(store.calls.inserts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_insert_failure_is_persistence_failure_after_one_attempt() {
        let store = Arc::new(FailingStore {
            fail_find: false,
            calls: CallCounts::default(),
        });
        let pipeline = SubmissionPipeline::new(store.clone());

        let outcome = pipeline.run(&alice_fields());
        assert!(matches!(outcome, PipelineOutcome::PersistenceFailed(_)));
        assert!(!outcome.is_success());
        assert_eq!(store.calls.inserts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lost_insert_race_reports_duplicate() {
        let pipeline = SubmissionPipeline::new(Arc::new(RacingStore));
        assert!(matches!(
            pipeline.run(&alice_fields()),
            PipelineOutcome::DuplicateFound
        ));
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let pipeline = SubmissionPipeline::new(store.clone());
        let fields = SubmittedFields {
            date_of_birth: "30/02/2000".into(),
            ..alice_fields()
        };

        for _ in 0..3 {
            assert!(matches!(
                pipeline.run(&fields),
                PipelineOutcome::ValidationFailed(ValidationError::DateFormat)
            ));
        }
        assert!(store.is_empty().unwrap());
    }
}
