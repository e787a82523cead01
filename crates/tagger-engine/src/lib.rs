//! Attribute matching core.
//!
//! Two stages, the second depending on the first:
//!
//! - [`compile`] turns configuration rows into a [`RuleSet`]: rules grouped
//!   by attribute in first-seen order, each keyword pattern compiled to a
//!   word-boundary regex exactly once.
//! - [`matcher`] and [`dataset`] evaluate a compiled rule set against
//!   description text. `match_description` is a pure function of its
//!   inputs; `process_dataset` applies it over a whole table, appending one
//!   column per attribute while preserving row order.
//!
//! [`batch`] layers windowed processing with progress callbacks on top;
//! it is a scheduling concern only and changes no matching semantics.

pub mod batch;
pub mod compile;
pub mod dataset;
pub mod matcher;
pub mod stats;

pub use batch::{BatchProgress, process_in_batches};
pub use compile::{
    AttributeRules, CompiledPattern, CompiledRule, RuleSet, compile_frame, compile_rules,
};
pub use dataset::process_dataset;
pub use matcher::{match_attribute, match_description};
pub use stats::{MatchStats, compute_stats};
