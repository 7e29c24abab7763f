//! Person record types.

use crate::validation::ValidatedPerson;
use chrono::{DateTime, Utc};
use intake_types::{BirthDate, IdNumber, NonEmptyText};
use intake_uuid::ShardableUuid;

/// A record ready to be inserted. The store assigns the identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: NonEmptyText,
    pub surname: NonEmptyText,
    pub id_number: IdNumber,
    pub date_of_birth: BirthDate,
}

impl From<ValidatedPerson> for PersonDraft {
    fn from(person: ValidatedPerson) -> Self {
        Self {
            name: person.name,
            surname: person.surname,
            id_number: person.id_number,
            date_of_birth: person.date_of_birth,
        }
    }
}

/// A stored person.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRecord {
    /// Store-assigned identifier.
    pub id: ShardableUuid,
    pub name: NonEmptyText,
    pub surname: NonEmptyText,
    /// Unique across the collection.
    pub id_number: IdNumber,
    pub date_of_birth: BirthDate,
    pub created_at: DateTime<Utc>,
}

impl PersonRecord {
    /// Completes a draft with the identifier and creation time chosen by a store.
    pub fn from_draft(id: ShardableUuid, draft: PersonDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            id_number: draft.id_number,
            date_of_birth: draft.date_of_birth,
            created_at,
        }
    }
}
