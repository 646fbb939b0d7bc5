//! Page-load entry point
//!
//! Every page load goes through [`Reader::on_page_load`]: content pages get a
//! redirect attempt, retried while the page keeps rendering; print pages get a
//! back control. The reader owns the session state and the navigator, so one
//! reader stands for one browsing session across many page loads.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::back::{fallback_control, find_back_control, BackControl};
use crate::config::OBSERVATION_TIMEOUT;
use crate::navigate::Navigator;
use crate::observe::{retry_until, ChangeFeed, ObservationOutcome};
use crate::page::Page;
use crate::print_url::is_print_page;
use crate::redirect::{RedirectCoordinator, RedirectDecision};
use crate::state::{NavigationState, SessionStore};

/// What happened on one page load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageLoadReport {
    Content {
        url: Url,
        decision: RedirectDecision,
        observation: Option<ObservationOutcome>,
    },
    Print {
        url: Url,
        back_control: Option<BackControl>,
        observation: Option<ObservationOutcome>,
    },
}

impl PageLoadReport {
    pub fn url(&self) -> &Url {
        match self {
            PageLoadReport::Content { url, .. } | PageLoadReport::Print { url, .. } => url,
        }
    }

    pub fn redirected(&self) -> bool {
        matches!(self, PageLoadReport::Content { decision, .. } if decision.redirected())
    }
}

/// One browsing session's worth of reader state
pub struct Reader<'a, S, N> {
    coordinator: RedirectCoordinator<'a>,
    state: NavigationState<S>,
    navigator: N,
    observation_timeout: Duration,
    back_control: Option<BackControl>,
}

impl<S: SessionStore, N: Navigator> Reader<'static, S, N> {
    /// Reader with the built-in model, opt-out list and observation timeout
    pub fn new(store: S, navigator: N) -> Self {
        Self::with_coordinator(RedirectCoordinator::default(), store, navigator)
    }
}

impl<'a, S: SessionStore, N: Navigator> Reader<'a, S, N> {
    pub fn with_coordinator(coordinator: RedirectCoordinator<'a>, store: S, navigator: N) -> Self {
        Self {
            coordinator,
            state: NavigationState::new(store),
            navigator,
            observation_timeout: OBSERVATION_TIMEOUT,
            back_control: None,
        }
    }

    pub fn state(&self) -> &NavigationState<S> {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Back control installed by the most recent print-page load
    pub fn back_control(&self) -> Option<&BackControl> {
        self.back_control.as_ref()
    }

    /// Handle a page load of `url` whose initial rendering is `markup`.
    ///
    /// Later renderings arrive on `changes`; the feed is closed before this
    /// returns.
    pub async fn on_page_load(
        &mut self,
        url: Url,
        markup: &str,
        changes: &mut ChangeFeed,
    ) -> PageLoadReport {
        // A new page load tears down whatever the previous one installed
        self.back_control = None;

        if is_print_page(url.as_str()) {
            self.handle_print_page(url, markup, changes).await
        } else {
            self.handle_content_page(url, markup, changes).await
        }
    }

    /// Activate the installed back control, if any. Returns whether one was
    /// installed.
    pub fn activate_back(&mut self) -> bool {
        match self.back_control.take() {
            Some(control) => {
                control.activate(&mut self.state, &mut self.navigator);
                true
            }
            None => false,
        }
    }

    async fn handle_content_page(
        &mut self,
        url: Url,
        markup: &str,
        changes: &mut ChangeFeed,
    ) -> PageLoadReport {
        self.state.forget_return_unless_at(&url);

        let coordinator = self.coordinator;
        let page = Page::parse(url.clone(), markup);
        let mut decision = coordinator.attempt(&page, &mut self.state, &mut self.navigator);

        let mut observation = None;
        if decision.is_retryable() {
            debug!(url = %url, ?decision, "watching for later renderings");
            let state = &mut self.state;
            let navigator = &mut self.navigator;
            let outcome = retry_until(changes, self.observation_timeout, |change| {
                let page = Page::parse(url.clone(), &change.markup);
                decision = coordinator.attempt(&page, state, navigator);
                !decision.is_retryable()
            })
            .await;
            observation = Some(outcome);
        } else {
            changes.close();
        }

        PageLoadReport::Content {
            url,
            decision,
            observation,
        }
    }

    async fn handle_print_page(
        &mut self,
        url: Url,
        markup: &str,
        changes: &mut ChangeFeed,
    ) -> PageLoadReport {
        let page = Page::parse(url.clone(), markup);
        let mut back_control = find_back_control(&page);

        let mut observation = None;
        if back_control.is_none() {
            let outcome = retry_until(changes, self.observation_timeout, |change| {
                back_control = find_back_control(&Page::parse(url.clone(), &change.markup));
                back_control.is_some()
            })
            .await;
            observation = Some(outcome);
        } else {
            changes.close();
        }

        let back_control = back_control.or_else(|| fallback_control(&self.state));
        match &back_control {
            Some(control) => info!(
                url = %url,
                label = control.label(),
                target = %control.target(),
                "back control installed"
            ),
            None => debug!(url = %url, "no back control and no origin to return to"),
        }
        self.back_control = back_control.clone();

        PageLoadReport::Print {
            url,
            back_control,
            observation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigate::{NavigationKind, RecordingNavigator};
    use crate::observe::{change_feed, DocumentChange};
    use crate::state::MemoryStore;

    const RECIPE_BODY: &str = "<p>Ingredients: 2 cups flour, 1 teaspoon salt, 3 tablespoons \
        butter, melted. Instructions: Preheat the oven. Whisk the flour and salt in a bowl, \
        stir in the butter and bake 20 minutes.</p>";

    fn reader() -> Reader<'static, MemoryStore, RecordingNavigator> {
        Reader::new(MemoryStore::new(), RecordingNavigator::new())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_print_link() {
        let mut reader = reader();
        let (tx, mut feed) = change_feed();
        tx.send(DocumentChange::new(format!("<html><body>{}</body></html>", RECIPE_BODY)))
            .unwrap();
        tx.send(DocumentChange::new(format!(
            "<html><body>{}<a href='/pancakes/print/'>Print</a></body></html>",
            RECIPE_BODY
        )))
        .unwrap();

        let report = reader
            .on_page_load(url("https://example.com/pancakes/"), "<html><body></body></html>", &mut feed)
            .await;

        assert!(report.redirected());
        match report {
            PageLoadReport::Content { observation, .. } => assert_eq!(
                observation,
                Some(ObservationOutcome::Satisfied { notifications: 2 })
            ),
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(reader.navigator().navigations().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_timeout() {
        let mut reader = reader();
        let (_tx, mut feed) = change_feed();

        let report = reader
            .on_page_load(
                url("https://example.com/pancakes/"),
                &format!("<html><body>{}</body></html>", RECIPE_BODY),
                &mut feed,
            )
            .await;

        assert_eq!(
            report,
            PageLoadReport::Content {
                url: url("https://example.com/pancakes/"),
                decision: RedirectDecision::NoCandidate,
                observation: Some(ObservationOutcome::TimedOut { notifications: 0 }),
            }
        );
        assert!(reader.navigator().navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_print_page_late_back_link() {
        let mut reader = reader();
        let (tx, mut feed) = change_feed();
        tx.send(DocumentChange::new("<html><body><a href='/pancakes/'>Back</a></body></html>"))
            .unwrap();

        let report = reader
            .on_page_load(url("https://example.com/pancakes/print/"), "<html><body></body></html>", &mut feed)
            .await;

        match report {
            PageLoadReport::Print { back_control: Some(control), observation, .. } => {
                assert!(matches!(control, BackControl::NativeLink { .. }));
                assert_eq!(observation, Some(ObservationOutcome::Satisfied { notifications: 1 }));
            }
            other => panic!("unexpected report {:?}", other),
        }

        assert!(reader.activate_back());
        assert_eq!(reader.navigator().last().map(|n| n.kind), Some(NavigationKind::Native));
        assert!(!reader.activate_back());
    }

    #[tokio::test(start_paused = true)]
    async fn test_print_page_without_origin_gets_nothing() {
        let mut reader = reader();
        let (tx, mut feed) = change_feed();
        drop(tx);

        let report = reader
            .on_page_load(url("https://example.com/pancakes/print/"), "<html><body></body></html>", &mut feed)
            .await;

        assert!(matches!(report, PageLoadReport::Print { back_control: None, .. }));
        assert!(reader.back_control().is_none());
    }
}
