//! Navigation state - the only thing that survives from one page load to the next
//!
//! Backed by a session-scoped key/value store. The origin URL and redirect
//! target are always written together; afterwards either can be cleared on
//! its own.

use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

use crate::config::{ORIGIN_URL_KEY, REDIRECT_TARGET_KEY, RETURN_MARKER_KEY};

/// Session-scoped key/value storage (survives navigation, not the session)
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process store for one simulated browsing session
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Plain copy of the persisted fields, for reports
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationSnapshot {
    pub origin_url: Option<String>,
    pub redirect_target_url: Option<String>,
    pub returned: bool,
}

/// Typed view over the persisted redirect record
#[derive(Debug, Clone, Default)]
pub struct NavigationState<S> {
    store: S,
}

impl<S: SessionStore> NavigationState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Content page the last redirect left from
    pub fn origin_url(&self) -> Option<String> {
        self.store.get(ORIGIN_URL_KEY).filter(|v| !v.is_empty())
    }

    /// Print page the last redirect went to; `None` once the user came back
    pub fn redirect_target_url(&self) -> Option<String> {
        self.store.get(REDIRECT_TARGET_KEY).filter(|v| !v.is_empty())
    }

    /// Whether the user left the print page through a back control
    pub fn has_returned(&self) -> bool {
        self.store.get(RETURN_MARKER_KEY).is_some()
    }

    /// Record a redirect from `origin` to `target`, superseding any earlier one
    pub fn record_redirect(&mut self, origin: &Url, target: &Url) {
        self.store.set(ORIGIN_URL_KEY, origin.as_str());
        self.store.set(REDIRECT_TARGET_KEY, target.as_str());
        self.store.remove(RETURN_MARKER_KEY);
    }

    /// The user is heading back to the origin page
    pub fn complete_return(&mut self) {
        self.store.remove(REDIRECT_TARGET_KEY);
        self.store.set(RETURN_MARKER_KEY, "1");
    }

    /// Whether redirecting away from `current` would bounce the user straight
    /// back to the print page they just left.
    pub fn suppresses(&self, current: &Url) -> bool {
        let pending = self.redirect_target_url().is_some() || self.has_returned();
        pending && self.origin_url().as_deref() == Some(current.as_str())
    }

    /// Drop the return marker once the user is on some other content page
    pub fn forget_return_unless_at(&mut self, current: &Url) {
        if self.origin_url().as_deref() != Some(current.as_str()) {
            self.store.remove(RETURN_MARKER_KEY);
        }
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            origin_url: self.origin_url(),
            redirect_target_url: self.redirect_target_url(),
            returned: self.has_returned(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
