//! On-disk person document format.
//!
//! A stored person is one YAML document:
//!
//! ```yaml
//! resourceType: Person
//! id: 550e8400e29b41d4a716446655440000
//! name: Alice
//! surname: Smith
//! idNumber: '1234567890123'
//! dateOfBirth: 15/06/1990
//! meta:
//!   created: 2026-10-16T09:30:00.123456Z
//! ```
//!
//! The wire struct denies unknown fields, and parsing goes through `serde_path_to_error` so a
//! schema mismatch reports the offending field path.

use crate::constants::PERSON_RESOURCE_TYPE;
use crate::record::PersonRecord;
use crate::{IntakeError, IntakeResult};
use chrono::{DateTime, SecondsFormat, Utc};
use intake_types::{BirthDate, IdNumber, NonEmptyText};
use intake_uuid::ShardableUuid;
use serde::{Deserialize, Serialize};

/// Person document operations.
///
/// Zero-sized; all methods are associated functions.
pub struct PersonDocument;

impl PersonDocument {
    /// Parse a person document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Translation`] if:
    /// - the YAML does not match the document schema (including unknown keys),
    /// - `resourceType` is not `Person`,
    /// - any field fails its type's validation (id, ID number, date, names, timestamp).
    pub fn parse(yaml_text: &str) -> IntakeResult<PersonRecord> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, PersonWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(IntakeError::Translation(format!(
                    "Person schema mismatch at {path}: {source}"
                )));
            }
        };

        if wire.resource_type != PERSON_RESOURCE_TYPE {
            return Err(IntakeError::Translation(format!(
                "Expected resourceType '{PERSON_RESOURCE_TYPE}', got '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }

    /// Render a person record as YAML text.
    pub fn render(record: &PersonRecord) -> IntakeResult<String> {
        let wire = domain_to_wire(record);
        Ok(serde_yaml::to_string(&wire)?)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PersonWire {
    #[serde(rename = "resourceType")]
    resource_type: String,
    id: String,
    name: String,
    surname: String,
    #[serde(rename = "idNumber")]
    id_number: String,
    #[serde(rename = "dateOfBirth")]
    date_of_birth: String,
    meta: PersonMetaWire,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PersonMetaWire {
    created: String,
}

fn wire_to_domain(wire: PersonWire) -> IntakeResult<PersonRecord> {
    let id = ShardableUuid::parse(&wire.id)
        .map_err(|e| IntakeError::Translation(format!("Invalid person id: {e}")))?;
    let name = NonEmptyText::new(&wire.name)
        .map_err(|e| IntakeError::Translation(format!("Invalid name: {e}")))?;
    let surname = NonEmptyText::new(&wire.surname)
        .map_err(|e| IntakeError::Translation(format!("Invalid surname: {e}")))?;
    let id_number = IdNumber::parse(&wire.id_number)
        .map_err(|e| IntakeError::Translation(format!("Invalid idNumber: {e}")))?;
    let date_of_birth = BirthDate::parse_dmy(&wire.date_of_birth)
        .map_err(|e| IntakeError::Translation(format!("Invalid dateOfBirth: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&wire.meta.created)
        .map_err(|e| IntakeError::Translation(format!("Invalid meta.created: {e}")))?
        .with_timezone(&Utc);

    Ok(PersonRecord {
        id,
        name,
        surname,
        id_number,
        date_of_birth,
        created_at,
    })
}

fn domain_to_wire(record: &PersonRecord) -> PersonWire {
    PersonWire {
        resource_type: PERSON_RESOURCE_TYPE.to_string(),
        id: record.id.to_string(),
        name: record.name.to_string(),
        surname: record.surname.to_string(),
        id_number: record.id_number.to_string(),
        date_of_birth: record.date_of_birth.to_string(),
        meta: PersonMetaWire {
            created: record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        },
    }
}
