//! Rule compilation: configuration rows to an indexed, pattern-compiled
//! rule set.
//!
//! Compilation is the only place a regex is ever built. Matching is
//! O(records × attributes × patterns), so every retained keyword gets its
//! word-boundary matcher precompiled here instead of in the per-record hot
//! path.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use regex::Regex;

use tagger_common::any_to_string;
use tagger_model::columns::{ATTRIBUTE, CONFIG_REQUIRED, PATTERNS, VARIATION};
use tagger_model::{ConfigRow, SchemaError, TableKind, split_patterns};

/// One keyword fragment with its precompiled word-boundary matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    keyword: String,
    matcher: Regex,
}

impl CompiledPattern {
    fn new(keyword: String) -> Result<Self> {
        // Keywords are escaped, so the only way this fails is a regex
        // size limit blowout on a pathological cell.
        let matcher = Regex::new(&format!(r"\b{}\b", regex::escape(&keyword)))
            .with_context(|| format!("compile pattern {keyword:?}"))?;
        Ok(Self { keyword, matcher })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// True when the keyword occurs in `text` as a whole word.
    ///
    /// `text` is expected to be lowercased already; keywords are lowercased
    /// at compile time.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// One configuration row, compiled: the variation it emits and the
/// patterns that trigger it.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    variation: String,
    patterns: Vec<CompiledPattern>,
}

impl CompiledRule {
    pub fn variation(&self) -> &str {
        &self.variation
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// A rule whose pattern cell contained only commas or whitespace is
    /// retained but can never match.
    pub fn is_inert(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// All rules of one attribute, in configuration-row order.
#[derive(Debug, Clone)]
pub struct AttributeRules {
    attribute: String,
    rules: Vec<CompiledRule>,
}

impl AttributeRules {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}

/// The compiled rule set for one processing run.
///
/// Groups are ordered by first appearance of their attribute in the
/// configuration table; that order determines output column order. Built
/// once per run, never mutated afterwards, and safe to share read-only
/// across worker threads.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    groups: Vec<AttributeRules>,
}

impl RuleSet {
    pub fn groups(&self) -> &[AttributeRules] {
        &self.groups
    }

    /// Attribute names in compiled (first-seen) order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(AttributeRules::attribute)
    }

    pub fn attribute_count(&self) -> usize {
        self.groups.len()
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|group| group.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Compiles configuration rows into a [`RuleSet`].
///
/// Rows are grouped by attribute, preserving first-seen order of distinct
/// attributes and row order within each group. Pattern cells are split on
/// commas, trimmed, lowercased, and empty fragments dropped; a row left
/// with no patterns is kept as an inert rule rather than rejected, so a
/// blank trailing comma in the spreadsheet never fails a run.
pub fn compile_rules(rows: &[ConfigRow]) -> Result<RuleSet> {
    let mut groups: Vec<AttributeRules> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        let patterns = split_patterns(&row.patterns_raw)
            .into_iter()
            .map(CompiledPattern::new)
            .collect::<Result<Vec<_>>>()?;
        let rule = CompiledRule {
            variation: row.variation.clone(),
            patterns,
        };
        match index.get(&row.attribute) {
            Some(&slot) => groups[slot].rules.push(rule),
            None => {
                index.insert(row.attribute.clone(), groups.len());
                groups.push(AttributeRules {
                    attribute: row.attribute.clone(),
                    rules: vec![rule],
                });
            }
        }
    }

    let rule_set = RuleSet { groups };
    tracing::debug!(
        attributes = rule_set.attribute_count(),
        rules = rule_set.rule_count(),
        "compiled rule set"
    );
    Ok(rule_set)
}

/// Compiles a configuration table read straight from a spreadsheet.
///
/// Fails with [`SchemaError`] if any of the three required columns is
/// absent, before reading a single row.
pub fn compile_frame(df: &DataFrame) -> Result<RuleSet> {
    let rows = config_rows_from_frame(df)?;
    compile_rules(&rows)
}

/// Extracts [`ConfigRow`]s from a configuration table.
///
/// The schema check runs first; cell values are then coerced to text, so a
/// numeric variation cell (e.g. `110`) is tolerated.
pub fn config_rows_from_frame(df: &DataFrame) -> Result<Vec<ConfigRow>> {
    let found: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    SchemaError::check(TableKind::Config, &CONFIG_REQUIRED, &found)?;

    let attribute = df.column(ATTRIBUTE)?.clone();
    let variation = df.column(VARIATION)?.clone();
    let patterns = df.column(PATTERNS)?.clone();

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(ConfigRow {
            attribute: any_to_string(attribute.get(idx)?),
            variation: any_to_string(variation.get(idx)?),
            patterns_raw: any_to_string(patterns.get(idx)?),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voltage_rows() -> Vec<ConfigRow> {
        vec![
            ConfigRow::new("Voltagem", "110v", "110,110v,127"),
            ConfigRow::new("Cor", "Amarelo", "amarelo,yellow"),
            ConfigRow::new("Voltagem", "Bivolt", "bivolt,biv"),
        ]
    }

    #[test]
    fn groups_preserve_first_seen_attribute_order() {
        let rule_set = compile_rules(&voltage_rows()).unwrap();
        let attrs: Vec<&str> = rule_set.attributes().collect();
        assert_eq!(attrs, vec!["Voltagem", "Cor"]);
        assert_eq!(rule_set.groups()[0].rules().len(), 2);
        assert_eq!(rule_set.groups()[0].rules()[0].variation(), "110v");
        assert_eq!(rule_set.groups()[0].rules()[1].variation(), "Bivolt");
    }

    #[test]
    fn patterns_are_lowercased_and_trimmed() {
        let rows = vec![ConfigRow::new("Cor", "Branca", " BRANCA , white ")];
        let rule_set = compile_rules(&rows).unwrap();
        let rule = &rule_set.groups()[0].rules()[0];
        let keywords: Vec<&str> = rule.patterns().iter().map(CompiledPattern::keyword).collect();
        assert_eq!(keywords, vec!["branca", "white"]);
    }

    #[test]
    fn empty_pattern_cell_yields_inert_rule() {
        let rows = vec![
            ConfigRow::new("Voltagem", "110v", ""),
            ConfigRow::new("Voltagem", "220v", ",,"),
        ];
        let rule_set = compile_rules(&rows).unwrap();
        assert_eq!(rule_set.rule_count(), 2);
        assert!(rule_set.groups()[0].rules().iter().all(CompiledRule::is_inert));
    }

    #[test]
    fn regex_metacharacters_in_patterns_are_literal() {
        let rows = vec![ConfigRow::new("Medida", "1.5m", "1.5")];
        let rule_set = compile_rules(&rows).unwrap();
        let pattern = &rule_set.groups()[0].rules()[0].patterns()[0];
        assert!(pattern.is_match("vara de 1.5 metros"));
        // An unescaped dot would let "1.5" match "125".
        assert!(!pattern.is_match("vara de 125 metros"));
    }
}
