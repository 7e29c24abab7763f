//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in request handling reads process-wide environment variables.

use crate::{IntakeError, IntakeResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which [`PersonStore`](crate::store::PersonStore) implementation to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreKind {
    /// YAML documents on disk under the data directory.
    #[default]
    File,
    /// Process-local map; records are lost on exit.
    Memory,
}

impl FromStr for StoreKind {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(IntakeError::InvalidInput(format!(
                "unknown store kind '{other}' (expected 'file' or 'memory')"
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    store_kind: StoreKind,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingDataDir`] if `store_kind` is [`StoreKind::File`] and
    /// `data_dir` is not an existing directory. The directory is never created implicitly.
    pub fn new(data_dir: PathBuf, store_kind: StoreKind) -> IntakeResult<Self> {
        if store_kind == StoreKind::File && !data_dir.is_dir() {
            return Err(IntakeError::MissingDataDir(data_dir));
        }

        Ok(Self {
            data_dir,
            store_kind,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_kind(&self) -> StoreKind {
        self.store_kind
    }
}

/// Parse the store kind from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`StoreKind::File`].
pub fn store_kind_from_env_value(value: Option<String>) -> IntakeResult<StoreKind> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<StoreKind>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
