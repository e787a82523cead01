//! Column names of the two input tables.
//!
//! Both tables come from user-authored spreadsheets, so the headers are the
//! Portuguese names the templates ship with. They are matched exactly,
//! after header normalization in the ingest layer.

/// Attribute grouping key in the configuration table.
pub const ATTRIBUTE: &str = "Atributo";

/// Variation value emitted when a rule matches.
pub const VARIATION: &str = "Variação";

/// Comma-separated keyword list driving the match.
pub const PATTERNS: &str = "Padrão de reconhecimento";

/// Record identifier in the data table.
pub const ID: &str = "ID";

/// Free-text description the patterns are matched against.
pub const DESCRIPTION: &str = "Descrição";

/// Required columns of the configuration table, in template order.
pub const CONFIG_REQUIRED: [&str; 3] = [ATTRIBUTE, VARIATION, PATTERNS];

/// Required columns of the data table, in template order.
pub const DATA_REQUIRED: [&str; 2] = [ID, DESCRIPTION];
