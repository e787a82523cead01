//! XLSX reading via calamine.
//!
//! The first worksheet is read; its first row is the header. Every cell is
//! coerced to text, so numeric IDs and pattern cells typed as numbers in
//! the spreadsheet behave the same as their CSV counterparts.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};

use tagger_common::format_numeric;

use crate::csv_table::CsvTable;

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        other => other.to_string(),
    }
}

/// Reads the first worksheet of an XLSX/XLS workbook into a [`CsvTable`].
pub fn read_xlsx_table(path: &Path) -> Result<CsvTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open workbook: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no worksheets: {}", path.display()))?
        .with_context(|| format!("read worksheet: {}", path.display()))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for row in rows_iter {
        let cells: Vec<String> = (0..headers.len())
            .map(|idx| row.get(idx).map(cell_to_string).unwrap_or_default())
            .collect();
        if cells.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read xlsx table");
    Ok(CsvTable { headers, rows })
}
