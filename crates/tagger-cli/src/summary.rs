use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use tagger_cli::pipeline::ProcessOutcome;
use tagger_common::any_to_string;

pub fn print_summary(outcome: &ProcessOutcome) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows_row = if outcome.rows_capped {
        Cell::new(format!(
            "{} (capped from {})",
            outcome.result.height(),
            outcome.rows_read
        ))
        .fg(Color::Yellow)
    } else {
        Cell::new(outcome.result.height())
    };
    table.add_row(vec![Cell::new("Rows processed"), rows_row]);
    table.add_row(vec![
        Cell::new("Attributes"),
        Cell::new(outcome.attributes.len()),
    ]);
    table.add_row(vec![Cell::new("Rules"), Cell::new(outcome.rule_count)]);
    table.add_row(vec![
        Cell::new("Total matches"),
        count_cell(outcome.stats.total_matches),
    ]);
    table.add_row(vec![
        Cell::new("Attributes with match"),
        count_cell(outcome.stats.attributes_with_match),
    ]);
    table.add_row(vec![
        Cell::new("Rows with match"),
        count_cell(outcome.stats.rows_with_match),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(format!("{} ms", outcome.duration_ms)),
    ]);
    println!("{table}");

    for path in &outcome.written {
        println!("Output: {}", path.display());
    }
}

/// Renders the first rows of a frame as a bordered table.
pub fn frame_preview(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
                if value.is_empty() {
                    dim_cell("-")
                } else {
                    Cell::new(value)
                }
            })
            .collect();
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
