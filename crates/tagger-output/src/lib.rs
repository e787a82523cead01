//! Result writers for the attribute tagger.
//!
//! - CSV and XLSX writers for the tagged result table, with optional
//!   splitting into numbered part files for very large results.
//! - Starter templates for the data and configuration tables.

mod templates;
mod writer;

pub use templates::{config_template, data_template};
pub use writer::{OutputFormat, write_frame, write_result};
