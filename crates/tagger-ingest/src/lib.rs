//! Table ingestion for the attribute tagger.
//!
//! Consumes the configuration and data tables from CSV or XLSX files and
//! produces Polars DataFrames for the engine.
//! Schema validation (required columns, checked before any row is used)
//! happens in the engine at compile/process time; this crate only gets the
//! bytes into tabular form.

use std::path::Path;

use anyhow::{Result, bail};
use polars::prelude::DataFrame;

pub mod csv_table;
pub mod xlsx;

pub use csv_table::{CsvTable, read_csv_frame, read_csv_table};
pub use xlsx::read_xlsx_table;

/// Supported input file formats, detected from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// Detects the format from a path's extension (`csv`, `xlsx`, `xls`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Xlsx),
            other => bail!(
                "unsupported input format {other:?} for {}; expected .csv or .xlsx",
                path.display()
            ),
        }
    }
}

/// Reads the configuration table.
///
/// Always goes through the text-preserving readers: configuration cells
/// are keyword lists, and type inference turning `110,110v,127` into
/// anything but text would corrupt them.
pub fn read_config_frame(path: &Path) -> Result<DataFrame> {
    let table = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv_table(path)?,
        TableFormat::Xlsx => read_xlsx_table(path)?,
    };
    table.to_frame()
}

/// Reads the data table.
///
/// CSV goes through Polars with type inference so pass-through columns
/// keep their dtypes; XLSX is read as text columns.
pub fn read_data_frame(path: &Path) -> Result<DataFrame> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv_frame(path),
        TableFormat::Xlsx => read_xlsx_table(path)?.to_frame(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn format_detection() {
        assert_eq!(
            TableFormat::from_path(Path::new("dados.csv")).unwrap(),
            TableFormat::Csv
        );
        assert_eq!(
            TableFormat::from_path(Path::new("dados.XLSX")).unwrap(),
            TableFormat::Xlsx
        );
        assert!(TableFormat::from_path(Path::new("dados.parquet")).is_err());
        assert!(TableFormat::from_path(Path::new("dados")).is_err());
    }

    #[test]
    fn config_frame_keeps_pattern_cells_as_text() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(
            "Atributo,Variação,Padrão de reconhecimento\nVoltagem,110v,\"110,110v,127\"\n"
                .as_bytes(),
        )
        .unwrap();
        let frame = read_config_frame(file.path()).unwrap();
        assert_eq!(frame.height(), 1);
        let value = frame
            .column("Padrão de reconhecimento")
            .unwrap()
            .str()
            .unwrap()
            .get(0)
            .unwrap();
        assert_eq!(value, "110,110v,127");
    }

    #[test]
    fn data_frame_reads_id_and_description() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all("ID,Descrição\n1414,Ventilador de teto 110 amarelo biv\n".as_bytes())
            .unwrap();
        let frame = read_data_frame(file.path()).unwrap();
        assert_eq!(frame.height(), 1);
        assert!(frame.column("ID").is_ok());
        assert!(frame.column("Descrição").is_ok());
    }
}
