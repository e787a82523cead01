//! Pipeline stage functions for the `process` command.
//!
//! Ingest, compile, cap, match, write. Kept out of `main.rs` so the whole
//! run is callable from integration tests without spawning the binary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use tagger_engine::{
    BatchProgress, MatchStats, RuleSet, compile_frame, compute_stats, process_in_batches,
};
use tagger_ingest::{read_config_frame, read_data_frame};
use tagger_model::RunLimits;
use tagger_output::{OutputFormat, write_result};

/// Everything the `process` command needs for one run.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Configuration table (attribute/variation/patterns).
    pub config_path: PathBuf,
    /// Data table (ID/description).
    pub data_path: PathBuf,
    /// Result file; format is derived from its extension unless forced.
    pub output_path: PathBuf,
    /// Forced output format, overriding the extension.
    pub format: Option<OutputFormat>,
    /// Batch size, row cap and advisory timeout.
    pub limits: RunLimits,
    /// Split the result into part files above this many rows.
    pub split_rows: Option<usize>,
}

/// Rows kept from each table for `--preview` output.
pub const PREVIEW_ROWS: usize = 5;

/// What one run produced, for the summary table and tests.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// The full tagged result table.
    pub result: DataFrame,
    /// First rows of the configuration table, for preview output.
    pub config_preview: DataFrame,
    /// First rows of the (capped) data table, for preview output.
    pub data_preview: DataFrame,
    /// Attribute column names, in output order.
    pub attributes: Vec<String>,
    /// Rules compiled from the configuration table.
    pub rule_count: usize,
    /// Data rows before any cap was applied.
    pub rows_read: usize,
    /// True when `max_rows` dropped trailing rows.
    pub rows_capped: bool,
    /// Match counters over the result.
    pub stats: MatchStats,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u128,
}

/// Runs the full pipeline: read both tables, compile rules, match in
/// batches, write the result.
///
/// `on_progress` fires after every processed batch. The `max_rows` cap is
/// applied here, before the engine sees the data; the engine itself never
/// drops rows.
pub fn run_pipeline<F>(config: &ProcessConfig, on_progress: F) -> Result<ProcessOutcome>
where
    F: FnMut(BatchProgress),
{
    let start = Instant::now();

    let ingest_span = info_span!("ingest");
    let (config_frame, mut data_frame) = ingest_span.in_scope(|| -> Result<(DataFrame, DataFrame)> {
        let config_frame = read_config_frame(&config.config_path)
            .with_context(|| format!("read configuration table {}", config.config_path.display()))?;
        let data_frame = read_data_frame(&config.data_path)
            .with_context(|| format!("read data table {}", config.data_path.display()))?;
        Ok((config_frame, data_frame))
    })?;
    info!(
        config_rows = config_frame.height(),
        data_rows = data_frame.height(),
        "tables loaded"
    );

    let rule_set = compile_frame(&config_frame).context("compile configuration rules")?;
    info!(
        attributes = rule_set.attribute_count(),
        rules = rule_set.rule_count(),
        "rules compiled"
    );

    let rows_read = data_frame.height();
    let mut rows_capped = false;
    if let Some(max_rows) = config.limits.max_rows {
        if rows_read > max_rows {
            warn!(
                rows = rows_read,
                max_rows, "data table exceeds row cap; trailing rows dropped"
            );
            data_frame = data_frame.slice(0, max_rows);
            rows_capped = true;
        }
    }

    let match_span = info_span!("match");
    let match_start = Instant::now();
    let result = match_span.in_scope(|| {
        process_in_batches(&data_frame, &rule_set, &config.limits, on_progress)
    })?;
    info!(
        rows = result.height(),
        duration_ms = match_start.elapsed().as_millis(),
        "matching complete"
    );

    let stats = compute_stats(&result, &rule_set).context("compute match statistics")?;

    let write_span = info_span!("write");
    let written = write_span.in_scope(|| {
        write_result(&result, &config.output_path, config.format, config.split_rows)
    })?;

    let duration_ms = start.elapsed().as_millis();
    if let Some(timeout) = config.limits.timeout {
        if start.elapsed() > timeout {
            warn!(
                duration_ms,
                timeout_ms = timeout.as_millis(),
                "run exceeded the configured time budget"
            );
        }
    }

    Ok(ProcessOutcome {
        attributes: rule_set.attributes().map(String::from).collect(),
        rule_count: rule_set.rule_count(),
        config_preview: config_frame.head(Some(PREVIEW_ROWS)),
        data_preview: data_frame.head(Some(PREVIEW_ROWS)),
        result,
        rows_read,
        rows_capped,
        stats,
        written,
        duration_ms,
    })
}

/// Reads and compiles just the configuration table, for the `rules`
/// command.
pub fn load_rule_set(config_path: &std::path::Path) -> Result<RuleSet> {
    let config_frame = read_config_frame(config_path)
        .with_context(|| format!("read configuration table {}", config_path.display()))?;
    compile_frame(&config_frame).context("compile configuration rules")
}
