//! Print-page detection from the URL alone.
//!
//! A heuristic over well-known print-route conventions; false positives and
//! negatives are accepted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Route token used by the WP Recipe Maker plugin for its print view
pub const PLUGIN_PRINT_TOKEN: &str = "wprm_print";

static PRINT_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:/print/|/print(?:[?#]|$)|[?&]print(?:[=&#]|$)|recipe/print|print-view|printpage|/wprm_print/)",
    )
    .expect("Invalid print URL regex")
});

/// Whether `url` already points at a print variant
pub fn is_print_page(url: &str) -> bool {
    PRINT_URL_RE.is_match(url)
}

/// Whether `value` mentions printing at all (case-insensitive). Used to spot
/// print controls and to keep back-navigation away from print targets.
pub fn has_print_token(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("print") || lower.contains(PLUGIN_PRINT_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_paths() {
        assert!(is_print_page("https://example.com/recipes/pancakes/print/"));
        assert!(is_print_page("https://example.com/recipes/pancakes/print"));
        assert!(is_print_page("https://example.com/recipes/pancakes/print?servings=4"));
        assert!(is_print_page("https://example.com/recipe/print/1234"));
        assert!(is_print_page("https://example.com/PRINT/1234"));
    }

    #[test]
    fn test_print_query_parameters() {
        assert!(is_print_page("https://example.com/pancakes?print=1"));
        assert!(is_print_page("https://example.com/pancakes?id=4&print=true"));
        assert!(is_print_page("https://example.com/pancakes?print"));
        assert!(is_print_page("https://example.com/pancakes?print&id=4"));
    }

    #[test]
    fn test_print_tokens() {
        assert!(is_print_page("https://example.com/pancakes-print-view.html"));
        assert!(is_print_page("https://example.com/printpage.aspx?id=9"));
        assert!(is_print_page("https://example.com/wprm_print/12345"));
    }

    #[test]
    fn test_plain_content_urls() {
        assert!(!is_print_page("https://example.com/recipes/pancakes/"));
        assert!(!is_print_page("https://example.com/blog/printing-presses-history"));
        assert!(!is_print_page("https://example.com/pancakes?printer=hp"));
        assert!(!is_print_page("https://blueprint.example.com/recipes/soup"));
    }

    #[test]
    fn test_has_print_token() {
        assert!(has_print_token("Print Recipe"));
        assert!(has_print_token("/wprm_print/42"));
        assert!(!has_print_token("Jump to recipe"));
    }
}
