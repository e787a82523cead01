//! Windowed processing over [`process_dataset`].
//!
//! Batching exists only to bound peak memory and give incremental progress
//! feedback; it re-slices the input into fixed-size windows, processes each
//! window fully, and concatenates the results in order. It changes no
//! matching semantics, which is asserted by the order-preservation tests.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use tagger_model::RunLimits;

use crate::compile::RuleSet;
use crate::dataset::process_dataset;

/// Progress report handed to the callback after each processed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the window just finished.
    pub batch_index: usize,
    /// Rows processed so far, including this window.
    pub rows_done: usize,
    /// Total rows in the run.
    pub rows_total: usize,
}

impl BatchProgress {
    /// Completed fraction in `[0.0, 1.0]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.rows_total == 0 {
            1.0
        } else {
            self.rows_done as f64 / self.rows_total as f64
        }
    }
}

/// Processes `df` window by window, invoking `on_progress` after each one.
///
/// Window size comes from `limits.batch_size` (default 1000). The result
/// equals `process_dataset(df, rule_set)` row for row; only memory profile
/// and progress granularity differ. `limits.max_rows` is not applied here;
/// capping the input is the caller's policy, enforced before the engine is
/// invoked.
pub fn process_in_batches<F>(
    df: &DataFrame,
    rule_set: &RuleSet,
    limits: &RunLimits,
    mut on_progress: F,
) -> Result<DataFrame>
where
    F: FnMut(BatchProgress),
{
    let total = df.height();
    let batch_size = limits.effective_batch_size().max(1);

    let mut combined: Option<DataFrame> = None;
    let mut offset = 0usize;
    let mut batch_index = 0usize;
    while offset < total {
        let len = batch_size.min(total - offset);
        let window = df.slice(offset as i64, len);
        let processed = process_dataset(&window, rule_set)
            .with_context(|| format!("process window starting at row {offset}"))?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&processed)
                    .with_context(|| format!("concatenate window starting at row {offset}"))?;
            }
            None => combined = Some(processed),
        }
        offset += len;
        on_progress(BatchProgress {
            batch_index,
            rows_done: offset,
            rows_total: total,
        });
        batch_index += 1;
    }

    match combined {
        Some(result) => Ok(result),
        // Zero data rows: still append the (empty) attribute columns.
        None => process_dataset(df, rule_set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_rules;
    use polars::prelude::Column;
    use tagger_model::ConfigRow;

    fn rule_set() -> RuleSet {
        compile_rules(&[ConfigRow::new("Cor", "Azul", "azul")]).unwrap()
    }

    fn df(n: usize) -> DataFrame {
        let ids: Vec<i64> = (0..n as i64).collect();
        let descriptions: Vec<String> = (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    format!("cadeira azul {i}")
                } else {
                    format!("mesa verde {i}")
                }
            })
            .collect();
        DataFrame::new(vec![
            Column::new("ID".into(), ids),
            Column::new("Descrição".into(), descriptions),
        ])
        .unwrap()
    }

    #[test]
    fn batched_result_equals_direct_result() {
        let data = df(25);
        let rules = rule_set();
        let direct = process_dataset(&data, &rules).unwrap();
        let limits = RunLimits::default().with_batch_size(4);
        let batched = process_in_batches(&data, &rules, &limits, |_| {}).unwrap();
        assert!(direct.equals(&batched));
    }

    #[test]
    fn progress_reports_cover_all_rows() {
        let data = df(10);
        let limits = RunLimits::default().with_batch_size(3);
        let mut reports = Vec::new();
        process_in_batches(&data, &rule_set(), &limits, |p| reports.push(p)).unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].rows_done, 3);
        assert_eq!(reports.last().unwrap().rows_done, 10);
        assert!((reports.last().unwrap().fraction() - 1.0).abs() < f64::EPSILON);
        assert!(reports.windows(2).all(|w| w[0].rows_done < w[1].rows_done));
    }

    #[test]
    fn empty_table_still_gains_attribute_columns() {
        let data = df(0);
        let result =
            process_in_batches(&data, &rule_set(), &RunLimits::default(), |_| {}).unwrap();
        assert_eq!(result.height(), 0);
        assert!(result.column("Cor").is_ok());
    }
}
