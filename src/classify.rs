//! Page classification - is this page the kind of page worth redirecting?
//!
//! Scans the rendered text once for keyword-model terms and applies two fixed
//! thresholds: enough matches to rule out a single heavy term on an unrelated
//! page, and a high enough average weight to rule out pages full of generic
//! light terms.

use serde::Serialize;

use crate::config::{MIN_AVERAGE_WEIGHT, MIN_MATCH_COUNT};
use crate::keywords::KeywordModel;

/// Outcome of classifying one page load
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub is_on_topic: bool,
    pub match_count: usize,
    pub average_weight: f64,
}

impl ClassificationResult {
    /// Apply the on-topic rule to accumulated totals
    pub fn from_totals(match_count: usize, total_score: u64) -> Self {
        if match_count == 0 {
            return Self {
                is_on_topic: false,
                match_count: 0,
                average_weight: 0.0,
            };
        }

        let average_weight = total_score as f64 / match_count as f64;
        Self {
            is_on_topic: match_count > MIN_MATCH_COUNT && average_weight > MIN_AVERAGE_WEIGHT,
            match_count,
            average_weight,
        }
    }
}

/// Classify `text` against `model`
pub fn classify(text: &str, model: &KeywordModel) -> ClassificationResult {
    let mut match_count = 0usize;
    let mut total_score = 0u64;

    for term in model.find_terms(text) {
        if let Some(weight) = model.weight(term) {
            match_count += 1;
            total_score += u64::from(weight);
        }
    }

    ClassificationResult::from_totals(match_count, total_score)
}

/// Classify against the built-in model
pub fn is_on_topic(text: &str) -> bool {
    classify(text, KeywordModel::builtin()).is_on_topic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> KeywordModel {
        KeywordModel::new([("simmer", 600), ("whisk", 500), ("stir", 100)]).unwrap()
    }

    fn repeat(term: &str, times: usize) -> String {
        vec![term; times].join(" ")
    }

    #[test]
    fn test_ten_matches_is_not_enough() {
        let result = classify(&repeat("simmer", 10), &test_model());
        assert_eq!(result.match_count, 10);
        assert_eq!(result.average_weight, 600.0);
        assert!(!result.is_on_topic);
    }

    #[test]
    fn test_eleven_matches_is_on_topic() {
        let result = classify(&repeat("simmer", 11), &test_model());
        assert_eq!(result.match_count, 11);
        assert!(result.is_on_topic);
    }

    #[test]
    fn test_average_must_exceed_threshold() {
        let result = classify(&repeat("Whisk", 20), &test_model());
        assert_eq!(result.match_count, 20);
        assert_eq!(result.average_weight, 500.0);
        assert!(!result.is_on_topic);
    }

    #[test]
    fn test_no_matches() {
        let result = classify("The quarterly earnings call ran long.", &test_model());
        assert_eq!(result.match_count, 0);
        assert_eq!(result.average_weight, 0.0);
        assert!(!result.is_on_topic);
    }

    #[test]
    fn test_light_terms_drag_average_down() {
        let text = format!("{} {}", repeat("simmer", 11), repeat("stir", 11));
        let result = classify(&text, &test_model());
        assert_eq!(result.match_count, 22);
        assert_eq!(result.average_weight, 350.0);
        assert!(!result.is_on_topic);
    }

    #[test]
    fn test_from_totals_boundaries() {
        assert!(!ClassificationResult::from_totals(10, 6000).is_on_topic);
        assert!(ClassificationResult::from_totals(11, 6600).is_on_topic);
        assert!(!ClassificationResult::from_totals(20, 10_000).is_on_topic);
        assert!(!ClassificationResult::from_totals(0, 0).is_on_topic);
    }

    #[test]
    fn test_builtin_recipe_text() {
        let text = "Ingredients: 2 cups flour, 1 teaspoon salt, 3 tablespoons butter, \
                    melted. Instructions: Preheat the oven to 350 degrees. Whisk the \
                    flour and salt in a bowl, stir in the butter and bake 20 minutes.";
        assert!(is_on_topic(text));
    }

    #[test]
    fn test_builtin_news_text() {
        let text = "The central bank held rates steady on Tuesday, citing slower \
                    inflation and a cooling labour market, analysts said.";
        assert!(!is_on_topic(text));
    }
}
