//! Candidate discovery - find the control that leads to the print variant
//!
//! Elements mentioning print anywhere in their signals are visited in
//! document order. Each one is run through an ordered list of URL matchers
//! and the first URL produced wins:
//!
//! 1. a direct link target mentioning print
//! 2. a quoted absolute print URL inside an inline handler
//! 3. a `data-*` attribute value mentioning print that resolves as a URL
//!
//! The order follows reliability: a real link is trustworthy, URLs inferred
//! from attribute strings much less so.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::page::{resolve_url, ElementFacts, Page};
use crate::print_url::has_print_token;

/// Clickable elements plus the generic containers sites hang handlers on
static CANDIDATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        "a, button, input[type='button'], input[type='submit'], [role='button'], \
         [role='link'], [onclick], div, span, li",
    )
    .expect("Invalid candidate selector")
});

static QUOTED_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["'](https?://[^"'\s]+)["']"#).expect("Invalid quoted URL regex")
});

static PRINT_DIALOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bwindow\.print\s*\(").expect("Invalid print dialog regex")
});

/// A located print control and where it leads
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub element: ElementFacts,
    pub url: Url,
}

/// Pulls a print URL out of one element, or nothing
pub type UrlMatcher = fn(&ElementFacts, &Url) -> Option<Url>;

/// Matchers in priority order
pub const URL_MATCHERS: &[(&str, UrlMatcher)] = &[
    ("link_target", match_link_target),
    ("inline_handler", match_inline_handler),
    ("data_attribute", match_data_attribute),
];

/// Find the print-variant control on `page`.
///
/// Returns `None` straight away when the page's host opted out, before any
/// scan.
pub fn find_print_candidate(page: &Page, blocked_hostnames: &[&str]) -> Option<Candidate> {
    if is_blocked(page, blocked_hostnames) {
        debug!(url = %page.url(), "host is blocked, not scanning");
        return None;
    }

    let base = page.base_url();
    for element in page.elements(&CANDIDATE_SELECTOR) {
        if !has_print_token(&element.haystack()) || opens_print_dialog(&element) {
            continue;
        }

        for (name, matcher) in URL_MATCHERS {
            if let Some(url) = matcher(&element, base) {
                debug!(matcher = name, tag = %element.tag, url = %url, "print candidate found");
                return Some(Candidate { element, url });
            }
        }
    }

    None
}

/// `href` that mentions print
pub fn match_link_target(element: &ElementFacts, base: &Url) -> Option<Url> {
    element
        .href
        .as_deref()
        .filter(|href| has_print_token(href))
        .and_then(|href| resolve_url(base, href))
}

/// First quoted absolute URL mentioning print in any inline handler
pub fn match_inline_handler(element: &ElementFacts, base: &Url) -> Option<Url> {
    element
        .handlers
        .iter()
        .flat_map(|(_, code)| QUOTED_URL_RE.captures_iter(code))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|literal| has_print_token(literal))
        .and_then(|literal| resolve_url(base, literal))
}

/// First `data-*` value mentioning print that resolves as a URL.
///
/// Values that do not look like a URL reference (`data-action="print"`) or
/// fail to resolve are skipped and the next attribute is tried.
pub fn match_data_attribute(element: &ElementFacts, base: &Url) -> Option<Url> {
    for (name, value) in &element.data {
        if !has_print_token(value) || !looks_like_url_reference(value) {
            continue;
        }
        match resolve_url(base, value) {
            Some(url) => return Some(url),
            None => debug!(attribute = %name, value = %value, "unresolvable data attribute, skipping"),
        }
    }
    None
}

fn looks_like_url_reference(value: &str) -> bool {
    let value = value.trim();
    value.contains('/') || value.starts_with('?')
}

fn opens_print_dialog(element: &ElementFacts) -> bool {
    element
        .handlers
        .iter()
        .any(|(_, code)| PRINT_DIALOG_RE.is_match(code))
        || element
            .href
            .as_deref()
            .is_some_and(|href| PRINT_DIALOG_RE.is_match(href))
}

fn is_blocked(page: &Page, blocked_hostnames: &[&str]) -> bool {
    page.hostname().is_some_and(|host| {
        blocked_hostnames
            .iter()
            .any(|blocked| blocked.eq_ignore_ascii_case(&host))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/recipes/pancakes/").unwrap()
    }

    fn page(body: &str) -> Page {
        Page::parse(base(), &format!("<html><body>{}</body></html>", body))
    }

    fn facts() -> ElementFacts {
        ElementFacts {
            tag: "a".to_string(),
            text: "Print".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_link_target_matcher() {
        let element = ElementFacts {
            href: Some("print/".to_string()),
            ..facts()
        };
        assert_eq!(
            match_link_target(&element, &base()).unwrap().as_str(),
            "https://example.com/recipes/pancakes/print/"
        );

        let element = ElementFacts {
            href: Some("/shop".to_string()),
            ..facts()
        };
        assert!(match_link_target(&element, &base()).is_none());
    }

    #[test]
    fn test_inline_handler_matcher() {
        let element = ElementFacts {
            handlers: vec![(
                "onclick".to_string(),
                "track('https://stats.example.com/hit'); location.href='https://example.com/print/42'"
                    .to_string(),
            )],
            ..facts()
        };
        assert_eq!(
            match_inline_handler(&element, &base()).unwrap().as_str(),
            "https://example.com/print/42"
        );
    }

    #[test]
    fn test_inline_handler_needs_absolute_url() {
        let element = ElementFacts {
            handlers: vec![("onclick".to_string(), "go('/print/42')".to_string())],
            ..facts()
        };
        assert!(match_inline_handler(&element, &base()).is_none());
    }

    #[test]
    fn test_data_attribute_skips_bad_values() {
        let element = ElementFacts {
            data: vec![
                ("data-a".to_string(), "http://[print/".to_string()),
                ("data-b".to_string(), "print".to_string()),
                ("data-c".to_string(), "/wprm_print/77".to_string()),
            ],
            ..facts()
        };
        assert_eq!(
            match_data_attribute(&element, &base()).unwrap().as_str(),
            "https://example.com/wprm_print/77"
        );
    }

    #[test]
    fn test_link_target_beats_data_attribute() {
        let page = page(
            r#"<a href="/recipes/pancakes/print/" data-print-url="/wprm_print/9">Print</a>"#,
        );
        let candidate = find_print_candidate(&page, &[]).unwrap();
        assert_eq!(candidate.url.as_str(), "https://example.com/recipes/pancakes/print/");
    }

    #[test]
    fn test_first_element_in_document_order_wins() {
        let page = page(
            r#"<button data-href="/wprm_print/1">Print recipe</button>
               <a href="/recipes/pancakes/print/">Print</a>"#,
        );
        let candidate = find_print_candidate(&page, &[]).unwrap();
        assert_eq!(candidate.url.as_str(), "https://example.com/wprm_print/1");
        assert_eq!(candidate.element.tag, "button");
    }

    #[test]
    fn test_print_dialog_buttons_are_ignored() {
        let page = page(r#"<a href="/print/1" onclick="window.print(); return false;">Print</a>"#);
        assert!(find_print_candidate(&page, &[]).is_none());
    }

    #[test]
    fn test_blocked_host() {
        let page = Page::parse(
            Url::parse("https://Docs.Google.com/document/d/1").unwrap(),
            r#"<html><body><a href="/print/1">Print</a></body></html>"#,
        );
        assert!(find_print_candidate(&page, &["docs.google.com"]).is_none());
        assert!(find_print_candidate(&page, &[]).is_some());
    }

    #[test]
    fn test_no_candidate() {
        let page = page(r#"<a href="/recipes/waffles/">Waffles</a><p>Printable? No.</p>"#);
        assert!(find_print_candidate(&page, &[]).is_none());
    }
}
