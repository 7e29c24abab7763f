//! Constants used throughout the intake core crate.
//!
//! Path, filename and wire constants live here so the store, the document format and the
//! binaries agree on them.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "intake_data";

/// Directory name, under the data directory, holding person documents.
pub const PEOPLE_DIR_NAME: &str = "people";

/// Directory name, under the people directory, holding the ID number index.
pub const INDEX_DIR_NAME: &str = "index";

/// `resourceType` written into every person document.
pub const PERSON_RESOURCE_TYPE: &str = "Person";

/// Path the form posts to.
pub const SUBMIT_PATH: &str = "/submit";
