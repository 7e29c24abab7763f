use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BirthDateError {
    #[error("date must have the shape dd/MM/yyyy")]
    Shape,
    #[error("date is not a valid calendar date")]
    OutOfRange,
}

/// A calendar date of birth.
///
/// Held as a [`NaiveDate`]; the textual `dd/MM/yyyy` form exists only at the parse and
/// display boundaries, so two inputs naming the same day always serialise identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parses a `dd/MM/yyyy` date.
    ///
    /// Surrounding whitespace is ignored. Inside, the input must be exactly two day digits,
    /// `/`, two month digits, `/`, four year digits. The numbers must then name a real day in
    /// the proleptic Gregorian calendar with a year of at least 1.
    ///
    /// # Errors
    ///
    /// - [`BirthDateError::Shape`] if the trimmed text does not match `dd/MM/yyyy`.
    /// - [`BirthDateError::OutOfRange`] if the numbers do not name a calendar day.
    pub fn parse_dmy(input: &str) -> Result<Self, BirthDateError> {
        let bytes = input.trim().as_bytes();
        if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
            return Err(BirthDateError::Shape);
        }

        let day = digits(&bytes[0..2])?;
        let month = digits(&bytes[3..5])?;
        let year = digits(&bytes[6..10])?;

        if year == 0 {
            return Err(BirthDateError::OutOfRange);
        }

        // year <= 9999, so the cast is lossless
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(Self)
            .ok_or(BirthDateError::OutOfRange)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

fn digits(bytes: &[u8]) -> Result<u32, BirthDateError> {
    bytes.iter().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u32::from(b - b'0'))
        } else {
            Err(BirthDateError::Shape)
        }
    })
}

impl fmt::Display for BirthDate {
    /// Formats as `dd/MM/yyyy`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

impl FromStr for BirthDate {
    type Err = BirthDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_dmy(s)
    }
}

impl serde::Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BirthDate::parse_dmy(&s).map_err(serde::de::Error::custom)
    }
}
