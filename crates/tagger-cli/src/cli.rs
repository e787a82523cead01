//! CLI argument definitions for the attribute tagger.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tagger-cli",
    version,
    about = "Attribute tagger - tag product records from free-text descriptions",
    long_about = "Tag product records with attribute values inferred from their\n\
                  free-text descriptions, driven by a user-supplied pattern\n\
                  dictionary. Reads and writes CSV and XLSX tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Tag a data table using a configuration table and write the result.
    Process(ProcessArgs),

    /// Write starter templates for the data and configuration tables.
    Template(TemplateArgs),

    /// Compile a configuration table and list its rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Configuration table with Atributo, Variação and
    /// Padrão de reconhecimento columns (CSV or XLSX).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Data table with ID and Descrição columns (CSV or XLSX).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Result file (default: resultado.csv next to the data table).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: derived from the output extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Rows per processing batch.
    #[arg(long = "batch-size", value_name = "ROWS")]
    pub batch_size: Option<usize>,

    /// Drop data rows beyond this count before processing.
    #[arg(long = "max-rows", value_name = "ROWS")]
    pub max_rows: Option<usize>,

    /// Log a warning when the run takes longer than this many seconds.
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Split the result into numbered part files above this many rows.
    #[arg(long = "split-rows", value_name = "ROWS")]
    pub split_rows: Option<usize>,

    /// Print the first rows of the inputs and the result.
    #[arg(long = "preview")]
    pub preview: bool,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Directory to write the template files into.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// File format for the templates.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Configuration table to compile (CSV or XLSX).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Xlsx,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
