//! Match statistics over a processed result table.

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame};
use serde::{Deserialize, Serialize};

use tagger_common::any_to_string;

use crate::compile::RuleSet;

/// Summary counters for one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Total variation values emitted across all attribute cells.
    pub total_matches: usize,
    /// Attributes with at least one matching record.
    pub attributes_with_match: usize,
    /// Records with at least one matching attribute.
    pub rows_with_match: usize,
}

/// Computes [`MatchStats`] from a result table produced by
/// [`crate::process_dataset`].
///
/// A cell holding `"110v, Bivolt"` counts as two matches. Attribute columns
/// are located by the rule set's attribute names; anything else in the
/// table is ignored.
pub fn compute_stats(result: &DataFrame, rule_set: &RuleSet) -> Result<MatchStats> {
    let mut stats = MatchStats::default();
    let mut row_has_match = vec![false; result.height()];

    for attribute in rule_set.attributes() {
        let column = result.column(attribute)?.clone();
        let mut attribute_matched = false;
        for idx in 0..result.height() {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.is_empty() {
                continue;
            }
            attribute_matched = true;
            row_has_match[idx] = true;
            stats.total_matches += value.split(", ").count();
        }
        if attribute_matched {
            stats.attributes_with_match += 1;
        }
    }
    stats.rows_with_match = row_has_match.iter().filter(|matched| **matched).count();
    Ok(stats)
}
