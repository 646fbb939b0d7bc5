//! Redirect coordination - decide whether to leave this page for its print variant
//!
//! The checks short-circuit in a fixed order: already on a print page, not
//! on-topic, returning from a print page, no print control yet. Only when all
//! pass is the redirect recorded and the navigation issued.

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::classify::classify;
use crate::config::BLOCKED_HOSTNAMES;
use crate::keywords::KeywordModel;
use crate::locate::find_print_candidate;
use crate::navigate::{NavigationKind, Navigator};
use crate::page::Page;
use crate::print_url::is_print_page;
use crate::state::{NavigationState, SessionStore};

/// Why a redirect attempt did or did not navigate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RedirectDecision {
    AlreadyOnPrintPage,
    /// Not enough recipe text rendered (yet)
    OffTopic,
    /// Just came back from this page's print variant
    Suppressed,
    /// Worth redirecting but no print control rendered yet; retry later
    NoCandidate,
    Redirected { target: Url },
}

impl RedirectDecision {
    pub fn redirected(&self) -> bool {
        matches!(self, RedirectDecision::Redirected { .. })
    }

    /// Whether a later rendering of the same page could still change the
    /// outcome: more text may make it on-topic, more markup may add the link.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RedirectDecision::NoCandidate | RedirectDecision::OffTopic)
    }
}

/// Runs redirect attempts against one keyword model and opt-out list
#[derive(Debug, Clone, Copy)]
pub struct RedirectCoordinator<'a> {
    model: &'a KeywordModel,
    blocked_hostnames: &'a [&'a str],
}

impl Default for RedirectCoordinator<'static> {
    fn default() -> Self {
        Self::new(KeywordModel::builtin(), BLOCKED_HOSTNAMES)
    }
}

impl<'a> RedirectCoordinator<'a> {
    pub fn new(model: &'a KeywordModel, blocked_hostnames: &'a [&'a str]) -> Self {
        Self {
            model,
            blocked_hostnames,
        }
    }

    /// One redirect attempt for the current rendering of `page`
    pub fn attempt<S, N>(
        &self,
        page: &Page,
        state: &mut NavigationState<S>,
        navigator: &mut N,
    ) -> RedirectDecision
    where
        S: SessionStore,
        N: Navigator,
    {
        let current = page.url();

        if is_print_page(current.as_str()) {
            return RedirectDecision::AlreadyOnPrintPage;
        }

        let classification = classify(&page.text(), self.model);
        if !classification.is_on_topic {
            debug!(
                url = %current,
                matches = classification.match_count,
                average = classification.average_weight,
                "page is off-topic"
            );
            return RedirectDecision::OffTopic;
        }

        if state.suppresses(current) {
            debug!(url = %current, "returned from print page, not redirecting again");
            return RedirectDecision::Suppressed;
        }

        let Some(candidate) = find_print_candidate(page, self.blocked_hostnames) else {
            return RedirectDecision::NoCandidate;
        };

        state.record_redirect(current, &candidate.url);
        info!(from = %current, to = %candidate.url, "redirecting to print page");
        navigator.navigate(&candidate.url, NavigationKind::Scripted);

        RedirectDecision::Redirected {
            target: candidate.url,
        }
    }
}

/// Redirect attempt with the built-in model
pub fn attempt_redirect<S, N>(
    page: &Page,
    state: &mut NavigationState<S>,
    navigator: &mut N,
    blocked_hostnames: &[&str],
) -> RedirectDecision
where
    S: SessionStore,
    N: Navigator,
{
    RedirectCoordinator::new(KeywordModel::builtin(), blocked_hostnames).attempt(page, state, navigator)
}
