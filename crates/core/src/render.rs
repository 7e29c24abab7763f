//! Maps a pipeline outcome onto what the form shows next.
//!
//! Values here are raw text. HTML escaping happens once, in [`crate::page`].

use crate::pipeline::PipelineOutcome;
use crate::validation::SubmittedFields;

/// Shown when the duplicate check or the store rejects the ID number.
pub const DUPLICATE_REASON: &str = "Duplicate ID Number.";
/// Shown when the store could not be queried or written.
pub const PERSISTENCE_REASON: &str = "Could not save the record. Please try again.";
pub const SUCCESS_MESSAGE: &str = "Record saved.";

/// The single status line of a rendered form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayStatus {
    None,
    Error(String),
    Success,
}

impl DisplayStatus {
    /// Text of the status line, or `None` for the initial page.
    pub fn line(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Error(reason) => Some(format!("Error: {reason}")),
            Self::Success => Some(format!("Success: {SUCCESS_MESSAGE}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Values placed back into the form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EchoFields {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub date_of_birth: String,
}

impl From<&SubmittedFields> for EchoFields {
    fn from(fields: &SubmittedFields) -> Self {
        Self {
            name: fields.name.clone(),
            surname: fields.surname.clone(),
            id_number: fields.id_number.clone(),
            date_of_birth: fields.date_of_birth.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedForm {
    pub status: DisplayStatus,
    pub echo: EchoFields,
}

impl RenderedForm {
    /// The default page: empty fields, no message.
    pub fn initial() -> Self {
        Self {
            status: DisplayStatus::None,
            echo: EchoFields::default(),
        }
    }

    /// Failures echo the submitted strings untouched; success clears the form.
    pub fn from_outcome(outcome: &PipelineOutcome, submitted: &SubmittedFields) -> Self {
        let status = match outcome {
            PipelineOutcome::ValidationFailed(reason) => DisplayStatus::Error(reason.to_string()),
            PipelineOutcome::DuplicateFound => DisplayStatus::Error(DUPLICATE_REASON.to_string()),
            PipelineOutcome::PersistenceFailed(_) => {
                DisplayStatus::Error(PERSISTENCE_REASON.to_string())
            }
            PipelineOutcome::Success(_) => DisplayStatus::Success,
        };

        let echo = if outcome.is_success() {
            EchoFields::default()
        } else {
            EchoFields::from(submitted)
        };

        Self { status, echo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::record::PersonRecord;
    use crate::validation::ValidationError;
    use chrono::Utc;
    use intake_types::{BirthDate, IdNumber, NonEmptyText};
    use intake_uuid::ShardableUuid;

    fn submitted() -> SubmittedFields {
        SubmittedFields {
            name: "  Alice ".into(),
            surname: "Smith".into(),
            id_number: "1234567890123".into(),
            date_of_birth: "15/06/1990".into(),
        }
    }

    #[test]
    fn test_initial_page_has_no_status() {
        let form = RenderedForm::initial();
        assert_eq!(form.status, DisplayStatus::None);
        assert_eq!(form.status.line(), None);
        assert_eq!(form.echo, EchoFields::default());
    }

    #[test]
    fn test_validation_failure_echoes_raw_values() {
        let outcome = PipelineOutcome::ValidationFailed(ValidationError::DateFormat);
        let form = RenderedForm::from_outcome(&outcome, &submitted());

        assert_eq!(
            form.status.line().as_deref(),
            Some("Error: Date must be dd/MM/yyyy format.")
        );
        assert_eq!(form.echo.name, "  Alice ");
        assert_eq!(form.echo.date_of_birth, "15/06/1990");
    }

    #[test]
    fn test_duplicate_and_persistence_failures_echo() {
        for outcome in [
            PipelineOutcome::DuplicateFound,
            PipelineOutcome::PersistenceFailed(PersistenceError::LockPoisoned),
        ] {
            let form = RenderedForm::from_outcome(&outcome, &submitted());
            assert!(form.status.is_error());
            assert_eq!(form.echo, EchoFields::from(&submitted()));
        }
    }

    #[test]
    fn test_persistence_failure_hides_internal_detail() {
        let outcome = PipelineOutcome::PersistenceFailed(PersistenceError::Unavailable(
            "/var/lib/intake is read-only".into(),
        ));
        let form = RenderedForm::from_outcome(&outcome, &submitted());
        let line = form.status.line().expect("error line");
        assert!(!line.contains("/var/lib"), "got: {line}");
    }

    #[test]
    fn test_success_clears_fields() {
        let record = PersonRecord {
            id: ShardableUuid::new(),
            name: NonEmptyText::new("Alice").unwrap(),
            surname: NonEmptyText::new("Smith").unwrap(),
            id_number: IdNumber::parse("1234567890123").unwrap(),
            date_of_birth: BirthDate::parse_dmy("15/06/1990").unwrap(),
            created_at: Utc::now(),
        };
        let form = RenderedForm::from_outcome(&PipelineOutcome::Success(record), &submitted());

        assert_eq!(form.status, DisplayStatus::Success);
        assert_eq!(form.status.line().as_deref(), Some("Success: Record saved."));
        assert_eq!(form.echo, EchoFields::default());
    }
}
