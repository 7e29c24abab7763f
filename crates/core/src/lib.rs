//! # Intake Core
//!
//! Core logic for the person intake service.
//!
//! This crate contains the submission pipeline and everything beneath it:
//! - Ordered field validation of raw form input
//! - Duplicate detection and record writes through an injected [`PersonStore`]
//! - In-memory and sharded on-disk stores
//! - Mapping pipeline outcomes to the rendered form
//!
//! **No API concerns**: the HTTP listener belongs in `api-rest`, the command line in `intake-cli`.

pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod page;
pub mod paths;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod repositories;
pub mod store;
pub mod validation;

pub use config::{CoreConfig, StoreKind};
pub use error::{IntakeError, IntakeResult, PersistenceError, PersistenceResult};
pub use pipeline::{PipelineOutcome, SubmissionPipeline};
pub use record::{PersonDraft, PersonRecord};
pub use render::{DisplayStatus, EchoFields, RenderedForm};
pub use store::PersonStore;
pub use validation::{SubmittedFields, ValidationError};

pub use intake_types::{BirthDate, IdNumber, NonEmptyText};
pub use intake_uuid::ShardableUuid;
