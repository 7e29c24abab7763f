#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("data directory does not exist: {}", .0.display())]
    MissingDataDir(std::path::PathBuf),
    #[error("translation error: {0}")]
    Translation(String),
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;

/// Failures reported by a [`PersonStore`](crate::store::PersonStore).
///
/// Everything here except [`PersistenceError::DuplicateIdNumber`] is an infrastructure failure.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("a record with this ID number already exists")]
    DuplicateIdNumber,
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write index entry: {0}")]
    IndexWrite(std::io::Error),
    #[error("failed to read index entry: {0}")]
    IndexRead(std::io::Error),
    #[error("index entry for {id_number} is invalid: {reason}")]
    CorruptIndex { id_number: String, reason: String },
    #[error("record document is invalid: {0}")]
    Document(#[from] IntakeError),
    #[error("store lock poisoned")]
    LockPoisoned,
    /// For store implementations backed by an external service that cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;
