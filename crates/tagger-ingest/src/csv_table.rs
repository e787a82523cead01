//! CSV readers.
//!
//! Two paths exist. `read_csv_frame` hands the file to Polars and keeps
//! whatever dtypes it infers; it is the default for data tables, which can
//! be large. `read_csv_table` is a row-by-row reader over the `csv` crate
//! that normalizes headers (BOM, stray whitespace) and keeps every cell as
//! text; configuration tables go through it because their headers come
//! from hand-edited spreadsheets.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use polars::prelude::{Column, CsvReadOptions, DataFrame, SerReader};

/// A fully-materialized table of text cells.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Converts to a DataFrame of string columns, preserving header and
    /// row order. Rows shorter than the header are padded with empty
    /// cells; longer rows are truncated.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let values: Vec<&str> = self
                .rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            columns.push(Column::new(header.as_str().into(), values));
        }
        DataFrame::new(columns).context("build dataframe from csv table")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file into a [`CsvTable`], treating the first non-empty row
/// as the header. Fully empty rows are skipped.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match headers.as_ref() {
            None => {
                headers = Some(cells.iter().map(|cell| normalize_header(cell)).collect());
            }
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(cells.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }

    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Reads a CSV file into a DataFrame with Polars type inference.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open csv reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("read csv: {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = df.height(), "read csv frame");
    Ok(df)
}
