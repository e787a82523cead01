//! Shared data model for the attribute tagger.
//!
//! The engine, ingest, and output crates all speak in terms of the types
//! defined here: raw configuration rows, compiled-pattern inputs, run
//! limits, and the schema error surfaced when a required column is missing.

pub mod columns;
pub mod config;
pub mod error;
pub mod options;

pub use config::{ConfigRow, split_patterns};
pub use error::{SchemaError, TableKind};
pub use options::RunLimits;
