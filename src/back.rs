//! Back navigation on print pages
//!
//! Three strategies in decreasing confidence; the first that yields a usable
//! control is the only one installed:
//!
//! 1. a back/return/recipe/close control with a real link target that is not
//!    itself a print URL, left to navigate natively
//! 2. the same kind of control carrying a content reference in a `data-*`
//!    attribute, rewired to navigate there
//! 3. an injected fallback control leading to the stored origin URL
//!
//! Whatever the strategy, activation records the return so the origin page
//! does not immediately redirect again.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::config::FALLBACK_LABEL;
use crate::navigate::{NavigationKind, Navigator};
use crate::page::{resolve_url, ElementFacts, Page};
use crate::print_url::has_print_token;
use crate::state::{NavigationState, SessionStore};

static BACK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a, button, input[type='button'], [role='button'], [role='link']")
        .expect("Invalid back control selector")
});

static BACK_INTENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:go back|back|return|recipe|close)\b").expect("Invalid back intent regex")
});

/// Absolute URL, rooted path, or a slash-separated slug like `recipes/pancakes`
static CONTENT_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://\S+|/[\w\-./%~]*[\w]+[\w\-./%~?=&]*|[\w\-]+(?:/[\w\-]+)+/?)$")
        .expect("Invalid content reference regex")
});

/// The control installed on a print page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BackControl {
    /// Existing link; its own navigation is left alone
    NativeLink { label: String, target: Url },
    /// Existing control whose activation is rewired to a content reference
    Rewired { label: String, target: Url },
    /// Injected fixed-position control leading to the stored origin
    Fallback { label: String, target: Url },
}

impl BackControl {
    pub fn target(&self) -> &Url {
        match self {
            BackControl::NativeLink { target, .. }
            | BackControl::Rewired { target, .. }
            | BackControl::Fallback { target, .. } => target,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BackControl::NativeLink { label, .. }
            | BackControl::Rewired { label, .. }
            | BackControl::Fallback { label, .. } => label,
        }
    }

    /// The user activated the control.
    ///
    /// Exactly one navigation happens: the link's own for a native link, a
    /// scripted one (native default suppressed) for everything else.
    pub fn activate<S, N>(&self, state: &mut NavigationState<S>, navigator: &mut N)
    where
        S: SessionStore,
        N: Navigator,
    {
        state.complete_return();
        let kind = match self {
            BackControl::NativeLink { .. } => NavigationKind::Native,
            BackControl::Rewired { .. } | BackControl::Fallback { .. } => NavigationKind::Scripted,
        };
        info!(to = %self.target(), ?kind, "leaving print page");
        navigator.navigate(self.target(), kind);
    }
}

/// Look for an existing back control (strategies 1 and 2)
pub fn find_back_control(page: &Page) -> Option<BackControl> {
    let base = page.base_url();
    let controls: Vec<ElementFacts> = page
        .elements(&BACK_SELECTOR)
        .into_iter()
        .filter(has_back_intent)
        .collect();

    let native = controls.iter().find_map(|control| {
        control
            .href
            .as_deref()
            .filter(|href| !has_print_token(href))
            .and_then(|href| resolve_url(base, href))
            .filter(|target| !has_print_token(target.as_str()))
            .map(|target| BackControl::NativeLink {
                label: control.label().to_string(),
                target,
            })
    });
    if native.is_some() {
        return native;
    }

    controls.iter().find_map(|control| {
        control
            .data
            .iter()
            .map(|(_, value)| value.trim())
            .filter(|value| !has_print_token(value) && CONTENT_REF_RE.is_match(value))
            .find_map(|value| resolve_url(base, value))
            .map(|target| BackControl::Rewired {
                label: control.label().to_string(),
                target,
            })
    })
}

/// Strategy 3: the injected control, when there is an origin to go back to
pub fn fallback_control<S: SessionStore>(state: &NavigationState<S>) -> Option<BackControl> {
    let origin = state.origin_url()?;
    match Url::parse(&origin) {
        Ok(target) => Some(BackControl::Fallback {
            label: FALLBACK_LABEL.to_string(),
            target,
        }),
        Err(e) => {
            debug!(origin = %origin, error = %e, "stored origin is not a URL");
            None
        }
    }
}

fn has_back_intent(element: &ElementFacts) -> bool {
    BACK_INTENT_RE.is_match(&element.text)
        || element
            .aria_label
            .as_deref()
            .is_some_and(|label| BACK_INTENT_RE.is_match(label))
}
