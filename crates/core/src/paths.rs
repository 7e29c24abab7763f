//! Store path helpers.

use crate::constants::{INDEX_DIR_NAME, PEOPLE_DIR_NAME};
use intake_types::IdNumber;
use std::path::{Path, PathBuf};

/// Person YAML filename.
pub struct PersonFile;

impl PersonFile {
    pub const NAME: &'static str = "person.yaml";
}

/// `<data_dir>/people/`
pub fn people_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(PEOPLE_DIR_NAME)
}

/// `<data_dir>/people/index/`
pub fn index_dir(data_dir: &Path) -> PathBuf {
    people_dir(data_dir).join(INDEX_DIR_NAME)
}

/// `<data_dir>/people/index/<id_number>`
///
/// `IdNumber` only ever holds ASCII digits, so it is always a safe single path segment.
pub fn index_entry(data_dir: &Path, id_number: &IdNumber) -> PathBuf {
    index_dir(data_dir).join(id_number.as_str())
}
