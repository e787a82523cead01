//! Raw configuration rows and pattern-cell parsing.

use serde::{Deserialize, Serialize};

/// One row of the configuration table, as read from the spreadsheet.
///
/// `patterns_raw` is the untouched cell text; [`split_patterns`] derives the
/// keyword list from it at rule-compilation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRow {
    pub attribute: String,
    pub variation: String,
    pub patterns_raw: String,
}

impl ConfigRow {
    pub fn new(
        attribute: impl Into<String>,
        variation: impl Into<String>,
        patterns_raw: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            variation: variation.into(),
            patterns_raw: patterns_raw.into(),
        }
    }
}

/// Splits a raw pattern cell into lowercase keyword fragments.
///
/// Fragments are separated by commas; each is trimmed and lowercased, and
/// fragments that are empty after trimming are dropped. A cell of `""` or
/// `",,"` therefore yields no patterns at all, which is tolerated: the rule
/// stays in the set but can never match.
pub fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|fragment| fragment.trim().to_lowercase())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
