use std::fmt;
use std::str::FromStr;

/// Number of digits in a national identity number.
pub const ID_NUMBER_LEN: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdNumberError {
    #[error("ID number must be 13 characters long, got {0}")]
    Length(usize),
    #[error("ID number must contain only decimal digits")]
    NonDigit,
}

/// A 13-digit national identity number.
///
/// The value is kept exactly as submitted: no trimming, no separators. Leading zeros are
/// significant, so the number is never stored as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdNumber(String);

impl IdNumber {
    /// Parses an identity number.
    ///
    /// # Errors
    ///
    /// - [`IdNumberError::Length`] if `input` is not exactly 13 characters.
    /// - [`IdNumberError::NonDigit`] if any character is not an ASCII decimal digit.
    pub fn parse(input: &str) -> Result<Self, IdNumberError> {
        let len = input.chars().count();
        if len != ID_NUMBER_LEN {
            return Err(IdNumberError::Length(len));
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdNumberError::NonDigit);
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IdNumber {
    type Err = IdNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for IdNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for IdNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for IdNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IdNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}
