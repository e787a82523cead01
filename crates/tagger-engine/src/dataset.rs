//! Full-table orchestration: one appended column per attribute.

use anyhow::Result;
use polars::prelude::{AnyValue, Column, DataFrame};
use rayon::prelude::*;

use tagger_common::any_to_string;
use tagger_model::columns::{DATA_REQUIRED, DESCRIPTION};
use tagger_model::{SchemaError, TableKind};

use crate::compile::RuleSet;
use crate::matcher::match_attribute;

/// Applies a compiled rule set to every record of a data table.
///
/// Fails with [`SchemaError`] if the table lacks an `ID` or `Descrição`
/// column, before any row is touched. Otherwise returns a copy of the
/// input with one new string column per attribute, in compiled attribute
/// order; rows are never reordered or filtered. A missing/null description
/// coerces to empty text and yields empty matches, not an error.
///
/// Records are independent, so each attribute column is evaluated in
/// parallel across rows; the positional collect keeps results in input
/// order.
pub fn process_dataset(df: &DataFrame, rule_set: &RuleSet) -> Result<DataFrame> {
    let found: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    SchemaError::check(TableKind::Data, &DATA_REQUIRED, &found)?;

    let description = df.column(DESCRIPTION)?.clone();
    let mut lowered = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let text = any_to_string(description.get(idx).unwrap_or(AnyValue::Null));
        lowered.push(text.to_lowercase());
    }

    let mut out = df.clone();
    for group in rule_set.groups() {
        let values: Vec<String> = lowered
            .par_iter()
            .map(|text| match_attribute(group, text))
            .collect();
        out.with_column(Column::new(group.attribute().into(), values))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_rules;
    use tagger_model::ConfigRow;

    fn sample_rule_set() -> RuleSet {
        compile_rules(&[
            ConfigRow::new("Voltagem", "110v", "110,110v,127"),
            ConfigRow::new("Voltagem", "220v", "220,220v,227"),
            ConfigRow::new("Voltagem", "Bivolt", "bivolt,biv"),
            ConfigRow::new("Cor", "Amarelo", "amarelo,yellow"),
            ConfigRow::new("Cor", "Branca", "branca,white"),
        ])
        .unwrap()
    }

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("ID".into(), vec![1414i64, 2525]),
            Column::new(
                "Descrição".into(),
                vec![
                    "Ventilador de teto 110 amarelo biv",
                    "Luminária LED 220v branca",
                ],
            ),
        ])
        .unwrap()
    }

    fn cell(df: &DataFrame, column: &str, idx: usize) -> String {
        any_to_string(df.column(column).unwrap().get(idx).unwrap())
    }

    #[test]
    fn appends_one_column_per_attribute_in_rule_order() {
        let result = process_dataset(&sample_df(), &sample_rule_set()).unwrap();
        let names: Vec<String> = result
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["ID", "Descrição", "Voltagem", "Cor"]);
    }

    #[test]
    fn example_scenarios() {
        let result = process_dataset(&sample_df(), &sample_rule_set()).unwrap();
        assert_eq!(cell(&result, "Voltagem", 0), "110v, Bivolt");
        assert_eq!(cell(&result, "Cor", 0), "Amarelo");
        assert_eq!(cell(&result, "Voltagem", 1), "220v");
        assert_eq!(cell(&result, "Cor", 1), "Branca");
    }

    #[test]
    fn missing_description_column_is_a_schema_error() {
        let df = DataFrame::new(vec![Column::new("ID".into(), vec![1i64])]).unwrap();
        let err = process_dataset(&df, &sample_rule_set()).unwrap_err();
        let schema = err.downcast_ref::<SchemaError>().expect("schema error");
        assert_eq!(schema.table, TableKind::Data);
        assert_eq!(schema.missing, vec!["Descrição".to_string()]);
    }

    #[test]
    fn null_description_matches_nothing() {
        let df = DataFrame::new(vec![
            Column::new("ID".into(), vec![1i64, 2]),
            Column::new("Descrição".into(), vec![Some("biv 110"), None]),
        ])
        .unwrap();
        let result = process_dataset(&df, &sample_rule_set()).unwrap();
        assert_eq!(cell(&result, "Voltagem", 0), "110v, Bivolt");
        assert_eq!(cell(&result, "Voltagem", 1), "");
        assert_eq!(cell(&result, "Cor", 1), "");
    }

    #[test]
    fn pass_through_columns_survive_unchanged() {
        let df = DataFrame::new(vec![
            Column::new("ID".into(), vec![7i64]),
            Column::new("Descrição".into(), vec!["mesa branca"]),
            Column::new("Preço".into(), vec![99.9f64]),
        ])
        .unwrap();
        let result = process_dataset(&df, &sample_rule_set()).unwrap();
        assert_eq!(cell(&result, "Preço", 0), "99.9");
        assert_eq!(cell(&result, "Cor", 0), "Branca");
    }
}
