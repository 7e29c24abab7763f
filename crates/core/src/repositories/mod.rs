//! Repository services over the configured person store.

pub mod people;
