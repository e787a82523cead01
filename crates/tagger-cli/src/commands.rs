use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tagger_cli::pipeline::{ProcessConfig, ProcessOutcome, load_rule_set, run_pipeline};
use tagger_engine::CompiledPattern;
use tagger_model::RunLimits;
use tagger_output::{OutputFormat, config_template, data_template, write_frame};

use crate::cli::{OutputFormatArg, ProcessArgs, RulesArgs, TemplateArgs};
use crate::summary::{apply_table_style, dim_cell, frame_preview, header_cell};

pub fn run_process(args: &ProcessArgs) -> Result<ProcessOutcome> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.data));

    let mut limits = RunLimits::default();
    if let Some(batch_size) = args.batch_size {
        limits = limits.with_batch_size(batch_size);
    }
    if let Some(max_rows) = args.max_rows {
        limits = limits.with_max_rows(max_rows);
    }
    if let Some(secs) = args.timeout_secs {
        limits = limits.with_timeout(Duration::from_secs(secs));
    }

    let config = ProcessConfig {
        config_path: args.config.clone(),
        data_path: args.data.clone(),
        output_path: output,
        format: args.format.map(output_format),
        limits,
        split_rows: args.split_rows,
    };

    // Total row count is only known once the first batch reports in.
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} rows ({percent}%)")?
            .progress_chars("=>-"),
    );
    let outcome = run_pipeline(&config, |progress| {
        bar.set_length(progress.rows_total as u64);
        bar.set_position(progress.rows_done as u64);
    })?;
    bar.finish_and_clear();

    if args.preview {
        print_preview(&outcome);
    }
    Ok(outcome)
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("create template directory {}", args.dir.display()))?;
    let format = output_format(args.format);
    let extension = match format {
        OutputFormat::Csv => "csv",
        OutputFormat::Xlsx => "xlsx",
    };
    let data_path = args.dir.join(format!("modelo_dados.{extension}"));
    let config_path = args.dir.join(format!("modelo_config.{extension}"));

    write_frame(&data_template()?, &data_path, format)?;
    write_frame(&config_template()?, &config_path, format)?;
    info!(dir = %args.dir.display(), "templates written");
    println!("Data template:   {}", data_path.display());
    println!("Config template: {}", config_path.display());
    Ok(())
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rule_set = load_rule_set(&args.config)?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Variation"),
        header_cell("Patterns"),
    ]);
    apply_table_style(&mut table);
    for group in rule_set.groups() {
        for rule in group.rules() {
            let patterns: Vec<&str> = rule
                .patterns()
                .iter()
                .map(CompiledPattern::keyword)
                .collect();
            let pattern_cell = if rule.is_inert() {
                dim_cell("(no patterns)")
            } else {
                Cell::new(patterns.join(", "))
            };
            table.add_row(vec![
                Cell::new(group.attribute()),
                Cell::new(rule.variation()),
                pattern_cell,
            ]);
        }
    }
    println!("{table}");
    println!(
        "{} attribute(s), {} rule(s)",
        rule_set.attribute_count(),
        rule_set.rule_count()
    );
    Ok(())
}

fn print_preview(outcome: &ProcessOutcome) {
    println!("Configuration (first rows):");
    println!("{}", frame_preview(&outcome.config_preview));
    println!("Data (first rows):");
    println!("{}", frame_preview(&outcome.data_preview));
    println!("Result (first rows):");
    println!(
        "{}",
        frame_preview(&outcome.result.head(Some(tagger_cli::pipeline::PREVIEW_ROWS)))
    );
}

fn default_output_path(data_path: &Path) -> PathBuf {
    data_path.with_file_name("resultado.csv")
}

fn output_format(arg: OutputFormatArg) -> OutputFormat {
    match arg {
        OutputFormatArg::Csv => OutputFormat::Csv,
        OutputFormatArg::Xlsx => OutputFormat::Xlsx,
    }
}
