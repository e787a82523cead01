use thiserror::Error;

/// Which input table a schema failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The configuration table (`Atributo` / `Variação` / `Padrão de reconhecimento`).
    Config,
    /// The data table (`ID` / `Descrição` plus pass-through columns).
    Data,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Config => "configuration table",
            Self::Data => "data table",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A required column is absent from an input table.
///
/// Raised before any row of the offending table is read. Carries the actual
/// column set so the caller can show the user what was found instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{table} is missing required column(s) {missing:?}; found columns {found:?}")]
pub struct SchemaError {
    pub table: TableKind,
    pub missing: Vec<String>,
    pub found: Vec<String>,
}

impl SchemaError {
    /// Checks `found` against `required`, returning `Err` when any required
    /// column is absent.
    pub fn check(
        table: TableKind,
        required: &[&str],
        found: &[String],
    ) -> Result<(), SchemaError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !found.iter().any(|col| col == *name))
            .map(|name| (*name).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError {
                table,
                missing,
                found: found.to_vec(),
            })
        }
    }
}
