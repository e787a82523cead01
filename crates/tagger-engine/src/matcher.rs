//! Whole-word matching of a compiled rule set against description text.
//!
//! Matching is case-insensitive: patterns were lowercased at compile time
//! and the description is lowercased once per call. Both functions here are
//! pure, which is what lets the dataset layer evaluate records in parallel
//! with no coordination.

use crate::compile::{AttributeRules, RuleSet};

/// Evaluates every attribute of `rule_set` against one description.
///
/// Returns `(attribute, value)` pairs in compiled attribute order. The
/// value is the `", "`-joined sequence of matched variations, or the empty
/// string when nothing matched.
pub fn match_description(rule_set: &RuleSet, description: &str) -> Vec<(String, String)> {
    let lowered = description.to_lowercase();
    rule_set
        .groups()
        .iter()
        .map(|group| (group.attribute().to_string(), match_attribute(group, &lowered)))
        .collect()
}

/// Evaluates one attribute's rules against an already-lowercased description.
///
/// Rules are visited in configuration-row order. The first pattern of a
/// rule that matches records the rule's variation and ends that rule's
/// evaluation; remaining patterns of the same rule are skipped. Variations
/// are deduplicated by value, so two rules emitting the same variation
/// contribute it once. Multiple distinct rules may all contribute.
pub fn match_attribute(group: &AttributeRules, lowered_description: &str) -> String {
    let mut found: Vec<&str> = Vec::new();
    for rule in group.rules() {
        if rule
            .patterns()
            .iter()
            .any(|pattern| pattern.is_match(lowered_description))
            && !found.contains(&rule.variation())
        {
            found.push(rule.variation());
        }
    }
    found.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_rules;
    use tagger_model::ConfigRow;

    fn rule_set(rows: &[(&str, &str, &str)]) -> RuleSet {
        let rows: Vec<ConfigRow> = rows
            .iter()
            .map(|(attr, var, pats)| ConfigRow::new(*attr, *var, *pats))
            .collect();
        compile_rules(&rows).unwrap()
    }

    #[test]
    fn whole_word_only() {
        let set = rule_set(&[("Tipo", "LED", "led")]);
        let group = &set.groups()[0];
        // "led" inside "fornecedor" is not a word.
        assert_eq!(match_attribute(group, "fornecedor xyz"), "");
        assert_eq!(match_attribute(group, "lâmpada led 12w"), "LED");
    }

    #[test]
    fn case_insensitive_via_lowercasing() {
        let set = rule_set(&[("Tipo", "LED", "led")]);
        let results = match_description(&set, "Lâmpada LED 12W");
        assert_eq!(results, vec![("Tipo".to_string(), "LED".to_string())]);
    }

    #[test]
    fn multiple_rules_contribute_in_order() {
        let set = rule_set(&[
            ("Voltagem", "110v", "110,110v,127"),
            ("Voltagem", "Bivolt", "bivolt,biv"),
        ]);
        let group = &set.groups()[0];
        assert_eq!(
            match_attribute(group, "ventilador de teto 110 amarelo biv"),
            "110v, Bivolt"
        );
    }

    #[test]
    fn rule_stops_at_first_matching_pattern() {
        // Both patterns of the rule occur; the variation is still recorded once.
        let set = rule_set(&[("Voltagem", "110v", "110,110v")]);
        let group = &set.groups()[0];
        assert_eq!(match_attribute(group, "abajur 110 110v"), "110v");
    }

    #[test]
    fn duplicate_variations_are_deduplicated() {
        let set = rule_set(&[
            ("Cor", "Amarelo", "amarelo"),
            ("Cor", "Amarelo", "yellow"),
        ]);
        let group = &set.groups()[0];
        assert_eq!(match_attribute(group, "banco amarelo yellow"), "Amarelo");
    }

    #[test]
    fn no_match_yields_empty_string() {
        let set = rule_set(&[("Cor", "Branca", "branca,white")]);
        let results = match_description(&set, "Ventilador de teto 110");
        assert_eq!(results, vec![("Cor".to_string(), String::new())]);
    }

    #[test]
    fn inert_rules_never_match() {
        let set = rule_set(&[("Voltagem", "110v", ",,")]);
        assert_eq!(match_attribute(&set.groups()[0], "qualquer 110 texto"), "");
    }
}
