//! Page - one rendered page load and the facts the reader needs from it
//!
//! Wraps the parsed markup together with the URL it was loaded from, and
//! exposes the rendered text and per-element snapshots in document order.

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use url::Url;

/// Elements that never contribute rendered text
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A snapshot of one element's signals, detached from the tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementFacts {
    /// Lowercase tag name
    pub tag: String,
    /// Whitespace-collapsed text content
    pub text: String,
    pub href: Option<String>,
    /// Inline event handler attributes (`onclick`, `onmousedown`, ...), ordered by name
    pub handlers: Vec<(String, String)>,
    pub aria_label: Option<String>,
    pub title: Option<String>,
    /// Custom `data-*` attributes, ordered by name
    pub data: Vec<(String, String)>,
}

impl ElementFacts {
    /// Capture the signals of `element`
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let mut facts = Self {
            tag: value.name().to_lowercase(),
            text: collapse_whitespace(&element.text().collect::<String>()),
            href: value.attr("href").map(|h| h.trim().to_string()),
            aria_label: value.attr("aria-label").map(String::from),
            title: value.attr("title").map(String::from),
            ..Default::default()
        };

        for (name, attr_value) in value.attrs() {
            let name = name.to_lowercase();
            if name.starts_with("data-") {
                facts.data.push((name, attr_value.to_string()));
            } else if name.starts_with("on") {
                facts.handlers.push((name, attr_value.to_string()));
            }
        }
        facts.data.sort();
        facts.handlers.sort();

        facts
    }

    /// All signals joined and case-folded, for cheap token checks
    pub fn haystack(&self) -> String {
        let mut parts: Vec<&str> = vec![self.text.as_str()];
        parts.extend(self.href.as_deref());
        parts.extend(self.handlers.iter().map(|(_, v)| v.as_str()));
        parts.extend(self.aria_label.as_deref());
        parts.extend(self.title.as_deref());
        parts.extend(self.data.iter().map(|(_, v)| v.as_str()));
        parts.join(" ").to_lowercase()
    }

    /// Visible text if any, else the accessible label
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            self.aria_label.as_deref().unwrap_or_default()
        } else {
            &self.text
        }
    }
}

/// One page load: its URL and parsed markup
pub struct Page {
    url: Url,
    base_url: Url,
    document: Html,
}

impl Page {
    /// Parse `markup` as loaded from `url`
    pub fn parse(url: Url, markup: &str) -> Self {
        let document = Html::parse_document(markup);
        let base_url = find_base_href(&document)
            .and_then(|href| url.join(&href).ok())
            .unwrap_or_else(|| url.clone());

        Self {
            url,
            base_url,
            document,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL that relative references resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lowercase hostname, if the URL has one
    pub fn hostname(&self) -> Option<String> {
        self.url.host_str().map(str::to_lowercase)
    }

    /// Rendered text of the whole document, skipping scripts and styles
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_rendered_text(self.document.root_element(), &mut out);
        out
    }

    /// Snapshots of every element matching `selector`, in document order
    pub fn elements(&self, selector: &Selector) -> Vec<ElementFacts> {
        self.document
            .select(selector)
            .map(ElementFacts::from_element)
            .collect()
    }
}

/// Rendered text of standalone markup, for classifying a page without its URL
pub fn rendered_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut out = String::new();
    collect_rendered_text(document.root_element(), &mut out);
    out
}

/// Resolve `reference` against `base`, accepting only navigable web URLs.
///
/// Returns `None` for anything that fails to parse or lands on a non-http(s)
/// scheme such as `javascript:` or `mailto:`.
pub fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    let url = base.join(reference).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn find_base_href(document: &Html) -> Option<String> {
    let selector = Selector::parse("base[href]").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|base| base.value().attr("href"))
        .map(String::from)
}

fn collect_rendered_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
            }
            Node::Element(el) if NON_RENDERED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_rendered_text(child_el, out);
                    // Keep words in adjacent blocks apart
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
