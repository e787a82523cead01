//! Shared utilities for the tagger crates.
//!
//! Currently this is only the Polars `AnyValue` coercion helpers that the
//! engine and the writers use to turn arbitrary cell values into text.

pub mod polars;

pub use polars::{any_to_string, format_numeric};
