//! CLI library components for the attribute tagger.

pub mod logging;
pub mod pipeline;
