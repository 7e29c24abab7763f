//! Submission field validation.
//!
//! Raw form fields are checked against an ordered list of rules. The first rule that fails
//! decides the reason shown to the user; later rules never run. Only once every rule has passed
//! are the raw strings converted into a [`ValidatedPerson`].
//!
//! Nothing here touches storage. Whether the ID number is already taken is a separate step
//! (see [`PeopleRepository::exists`](crate::repositories::people::PeopleRepository::exists)).

use intake_types::{BirthDate, IdNumber, NonEmptyText};
use serde::Deserialize;

/// The four raw strings of one form submission.
///
/// Missing form keys deserialise to empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmittedFields {
    pub name: String,
    pub surname: String,
    #[serde(rename = "idNumber")]
    pub id_number: String,
    #[serde(rename = "dob")]
    pub date_of_birth: String,
}

/// Why a submission was rejected. `Display` is the exact user-facing reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Surname is required.")]
    SurnameRequired,
    #[error("ID Number must be exactly 13 digits.")]
    IdNumberFormat,
    #[error("Date must be dd/MM/yyyy format.")]
    DateFormat,
}

/// Fields that have passed every rule, in their typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedPerson {
    pub name: NonEmptyText,
    pub surname: NonEmptyText,
    pub id_number: IdNumber,
    pub date_of_birth: BirthDate,
}

struct Rule {
    passes: fn(&SubmittedFields) -> bool,
    reason: ValidationError,
}

/// Evaluated top to bottom; order is user-visible.
const RULES: [Rule; 4] = [
    Rule {
        passes: name_present,
        reason: ValidationError::NameRequired,
    },
    Rule {
        passes: surname_present,
        reason: ValidationError::SurnameRequired,
    },
    Rule {
        passes: id_number_well_formed,
        reason: ValidationError::IdNumberFormat,
    },
    Rule {
        passes: date_of_birth_well_formed,
        reason: ValidationError::DateFormat,
    },
];

fn name_present(fields: &SubmittedFields) -> bool {
    NonEmptyText::new(&fields.name).is_ok()
}

fn surname_present(fields: &SubmittedFields) -> bool {
    NonEmptyText::new(&fields.surname).is_ok()
}

fn id_number_well_formed(fields: &SubmittedFields) -> bool {
    IdNumber::parse(&fields.id_number).is_ok()
}

fn date_of_birth_well_formed(fields: &SubmittedFields) -> bool {
    BirthDate::parse_dmy(&fields.date_of_birth).is_ok()
}

/// Returns the reason of the first rule `fields` fails, if any.
pub fn first_failure(fields: &SubmittedFields) -> Option<ValidationError> {
    RULES
        .iter()
        .find(|rule| !(rule.passes)(fields))
        .map(|rule| rule.reason)
}

/// Validates a submission and converts it to typed fields.
///
/// The date is normalised: the stored value is re-serialised from the parsed calendar date,
/// not copied from the raw string.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing rule.
pub fn validate(fields: &SubmittedFields) -> Result<ValidatedPerson, ValidationError> {
    if let Some(reason) = first_failure(fields) {
        return Err(reason);
    }

    Ok(ValidatedPerson {
        name: NonEmptyText::new(&fields.name).map_err(|_| ValidationError::NameRequired)?,
        surname: NonEmptyText::new(&fields.surname)
            .map_err(|_| ValidationError::SurnameRequired)?,
        id_number: IdNumber::parse(&fields.id_number)
            .map_err(|_| ValidationError::IdNumberFormat)?,
        date_of_birth: BirthDate::parse_dmy(&fields.date_of_birth)
            .map_err(|_| ValidationError::DateFormat)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> SubmittedFields {
        SubmittedFields {
            name: "Alice".into(),
            surname: "Smith".into(),
            id_number: "1234567890123".into(),
            date_of_birth: "15/06/1990".into(),
        }
    }

    #[test]
    fn test_validate_accepts_valid_submission() {
        let person = validate(&valid_fields()).expect("valid fields should pass");
        assert_eq!(person.name.as_str(), "Alice");
        assert_eq!(person.surname.as_str(), "Smith");
        assert_eq!(person.id_number.as_str(), "1234567890123");
        assert_eq!(person.date_of_birth.to_string(), "15/06/1990");
    }

    #[test]
    fn test_blank_name_is_rejected_regardless_of_other_fields() {
        for name in ["", "   ", "\t"] {
            let fields = SubmittedFields {
                name: name.into(),
                surname: String::new(),
                id_number: "nope".into(),
                date_of_birth: "nope".into(),
            };
            assert_eq!(validate(&fields), Err(ValidationError::NameRequired));
        }
    }

    #[test]
    fn test_blank_surname_is_rejected_after_name() {
        let fields = SubmittedFields {
            surname: "  ".into(),
            id_number: "x".into(),
            ..valid_fields()
        };
        assert_eq!(validate(&fields), Err(ValidationError::SurnameRequired));
    }

    #[test]
    fn test_bad_id_number_is_rejected() {
        for id_number in ["", "123", "123456789012a", "12345678901234", " 1234567890123"] {
            let fields = SubmittedFields {
                id_number: id_number.into(),
                date_of_birth: "not a date".into(),
                ..valid_fields()
            };
            assert_eq!(
                validate(&fields),
                Err(ValidationError::IdNumberFormat),
                "id number {id_number:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        for dob in ["", " 1/01/2000", "31/04/2001", "2000-01-01", "15/6/1990"] {
            let fields = SubmittedFields {
                date_of_birth: dob.into(),
                ..valid_fields()
            };
            assert_eq!(
                validate(&fields),
                Err(ValidationError::DateFormat),
                "date {dob:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_date_is_normalised_from_parsed_value() {
        let fields = SubmittedFields {
            date_of_birth: "  01/01/2000 ".into(),
            ..valid_fields()
        };
        let person = validate(&fields).expect("padded date should pass");
        assert_eq!(person.date_of_birth.to_string(), "01/01/2000");
    }

    #[test]
    fn test_rejection_is_repeatable() {
        let fields = SubmittedFields {
            id_number: "12".into(),
            ..valid_fields()
        };
        assert_eq!(validate(&fields), validate(&fields));
    }

    #[test]
    fn test_reasons_match_user_facing_text() {
        assert_eq!(ValidationError::NameRequired.to_string(), "Name is required.");
        assert_eq!(
            ValidationError::SurnameRequired.to_string(),
            "Surname is required."
        );
        assert_eq!(
            ValidationError::IdNumberFormat.to_string(),
            "ID Number must be exactly 13 digits."
        );
        assert_eq!(
            ValidationError::DateFormat.to_string(),
            "Date must be dd/MM/yyyy format."
        );
    }

    #[test]
    fn test_first_failure_is_none_for_valid_fields() {
        assert_eq!(first_failure(&valid_fields()), None);
    }
}
