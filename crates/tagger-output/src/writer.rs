//! Frame writers.
//!
//! The result table is written cell-by-cell as text so the output matches
//! what the matcher produced, independent of column dtypes. CSV goes
//! through the `csv` crate, XLSX through `rust_xlsxwriter`. Large results
//! can be split into numbered part files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, Workbook};

use tagger_common::any_to_string;

/// Output file formats, detected from the extension unless forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => bail!(
                "unsupported output format {other:?} for {}; expected .csv or .xlsx",
                path.display()
            ),
        }
    }
}

fn frame_cells(df: &DataFrame) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        rows.push(row);
    }
    (headers, rows)
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let (headers, rows) = frame_cells(df);
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create csv: {}", path.display()))?;
    writer
        .write_record(&headers)
        .with_context(|| format!("write csv header: {}", path.display()))?;
    for row in rows {
        writer
            .write_record(&row)
            .with_context(|| format!("write csv row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}

fn write_xlsx(df: &DataFrame, path: &Path) -> Result<()> {
    let (headers, rows) = frame_cells(df);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Sheet1")
        .with_context(|| format!("name worksheet: {}", path.display()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .with_context(|| format!("write xlsx header: {}", path.display()))?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32 + 1, col as u16, value)
                .with_context(|| format!("write xlsx cell: {}", path.display()))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save xlsx: {}", path.display()))?;
    Ok(())
}

/// Writes one frame to one file in the given format.
pub fn write_frame(df: &DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(df, path),
        OutputFormat::Xlsx => write_xlsx(df, path),
    }?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote result file");
    Ok(())
}

fn part_path(path: &Path, part: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resultado");
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    path.with_file_name(format!("{stem}_part{part}.{extension}"))
}

/// Writes the result, splitting into `*_part<N>` files when it has more
/// rows than `split_rows`. Returns the paths written, in order.
pub fn write_result(
    df: &DataFrame,
    path: &Path,
    format: Option<OutputFormat>,
    split_rows: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(path)?,
    };

    let threshold = split_rows.unwrap_or(usize::MAX).max(1);
    if df.height() <= threshold {
        write_frame(df, path, format)?;
        return Ok(vec![path.to_path_buf()]);
    }

    let mut written = Vec::new();
    let mut offset = 0usize;
    let mut part = 1usize;
    while offset < df.height() {
        let len = threshold.min(df.height() - offset);
        let chunk = df.slice(offset as i64, len);
        let chunk_path = part_path(path, part);
        write_frame(&chunk, &chunk_path, format)?;
        written.push(chunk_path);
        offset += len;
        part += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("ID".into(), vec![1414i64, 2525, 3636]),
            Column::new("Voltagem".into(), vec!["110v, Bivolt", "220v", ""]),
        ])
        .unwrap()
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.csv")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.XLSX")).unwrap(),
            OutputFormat::Xlsx
        );
        assert!(OutputFormat::from_path(Path::new("out.txt")).is_err());
    }

    #[test]
    fn writes_csv_with_header_and_text_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultado.csv");
        write_result(&sample_frame(), &path, None, None).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "ID,Voltagem");
        assert_eq!(lines[1], "1414,\"110v, Bivolt\"");
        assert_eq!(lines[3], "3636,");
    }

    #[test]
    fn splits_into_parts_above_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultado.csv");
        let written = write_result(&sample_frame(), &path, None, Some(2)).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("resultado_part1.csv"),
                dir.path().join("resultado_part2.csv"),
            ]
        );
        let first = std::fs::read_to_string(&written[0]).unwrap();
        let second = std::fs::read_to_string(&written[1]).unwrap();
        assert_eq!(first.lines().count(), 3);
        assert_eq!(second.lines().count(), 2);
        assert!(second.contains("3636"));
    }

    #[test]
    fn no_split_at_exact_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultado.csv");
        let written = write_result(&sample_frame(), &path, None, Some(3)).unwrap();
        assert_eq!(written, vec![path]);
    }

    #[test]
    fn writes_xlsx_readable_by_calamine() {
        use calamine::{Data, Reader, open_workbook_auto};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultado.xlsx");
        write_result(&sample_frame(), &path, None, None).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.get_value((0, 1)), Some(&Data::String("Voltagem".into())));
        assert_eq!(
            range.get_value((1, 1)),
            Some(&Data::String("110v, Bivolt".into()))
        );
    }
}
