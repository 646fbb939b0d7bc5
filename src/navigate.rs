//! Navigation seam: the reader never touches the browsing context directly.

use serde::Serialize;
use url::Url;

/// Who moved the browsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// Issued by the reader
    Scripted,
    /// A link's own default action, left untouched
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub url: Url,
    pub kind: NavigationKind,
}

/// Receives every navigation of the browsing context. Once issued, a
/// navigation cannot be taken back.
pub trait Navigator {
    fn navigate(&mut self, url: &Url, kind: NavigationKind);
}

/// Keeps navigations in the order they were issued
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    navigations: Vec<Navigation>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    pub fn last(&self) -> Option<&Navigation> {
        self.navigations.last()
    }

    /// Hand over everything recorded so far
    pub fn take(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.navigations)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &Url, kind: NavigationKind) {
        self.navigations.push(Navigation {
            url: url.clone(),
            kind,
        });
    }
}
