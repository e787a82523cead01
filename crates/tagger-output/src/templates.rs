//! Downloadable starter tables.
//!
//! Small example tables users fill in before running a job. Row values
//! double as the worked example in the user guide: the first data row
//! matches Voltagem "110v, Bivolt" and Cor "Amarelo" under the config
//! template.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame};

/// Data table template: `ID` and `Descrição` with two example products.
pub fn data_template() -> Result<DataFrame> {
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
    .context("build data template")
}

/// Configuration table template: Voltagem and Cor attributes with their
/// variations and recognition patterns.
pub fn config_template() -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "Atributo".into(),
            vec!["Voltagem", "Voltagem", "Voltagem", "Cor", "Cor"],
        ),
        Column::new(
            "Variação".into(),
            vec!["110v", "220v", "Bivolt", "Amarelo", "Branca"],
        ),
        Column::new(
            "Padrão de reconhecimento".into(),
            vec![
                "110,110v,127",
                "220,220v,227",
                "bivolt,biv",
                "amarelo,yellow",
                "branca,white",
            ],
        ),
    ])
    .context("build config template")
}
