//! Replay scenarios - drive the reader through a scripted browsing session
//!
//! A scenario is a TOML file listing page loads in order. Each load names its
//! URL, the markup of its initial rendering, optional later renderings, and
//! whether the user activates the back control afterwards. All loads share
//! one in-memory session store, as they would within one browser tab.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::error::{ReaderError, Result};
use crate::navigate::{Navigation, RecordingNavigator};
use crate::observe::{change_feed, DocumentChange};
use crate::runner::{PageLoadReport, Reader};
use crate::state::{MemoryStore, NavigationSnapshot};

/// A scripted browsing session
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(rename = "load", default)]
    pub loads: Vec<ScenarioLoad>,
}

/// One page load within a scenario
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioLoad {
    /// Absolute URL of the page
    pub url: String,
    /// Markup file of the initial rendering, relative to the scenario file
    pub html: PathBuf,
    /// Later renderings, delivered as document changes
    #[serde(default)]
    pub renders: Vec<PathBuf>,
    /// Delay before each later rendering
    #[serde(default = "default_render_interval")]
    pub render_interval_ms: u64,
    /// Activate the back control once the load settles
    #[serde(default)]
    pub activate_back: bool,
}

fn default_render_interval() -> u64 {
    250
}

impl Scenario {
    /// Parse scenario TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        if scenario.loads.is_empty() {
            return Err(ReaderError::ScenarioError(
                "scenario has no [[load]] entries".to_string(),
            ));
        }
        Ok(scenario)
    }

    /// Load a scenario file; returns it with the directory its paths are
    /// relative to.
    pub fn load_from_file(path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml(&content)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((scenario, base_dir))
    }
}

/// Outcome of one scenario load
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub report: PageLoadReport,
    /// Navigations issued during the load, including a back activation
    pub navigations: Vec<Navigation>,
    /// Session state once the step finished
    pub state: NavigationSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
}

/// Run `scenario` against a fresh session
pub async fn replay(scenario: &Scenario, base_dir: &Path) -> Result<ReplayReport> {
    let mut reader = Reader::new(MemoryStore::new(), RecordingNavigator::new());
    let mut steps = Vec::with_capacity(scenario.loads.len());
    let mut expected_next: Option<Url> = None;

    for (index, load) in scenario.loads.iter().enumerate() {
        let url = Url::parse(&load.url)?;
        let markup = read_markup(base_dir, &load.html)?;
        let renders = load
            .renders
            .iter()
            .map(|path| read_markup(base_dir, path))
            .collect::<Result<Vec<_>>>()?;

        if let Some(expected) = expected_next.take() {
            if expected != url {
                warn!(
                    step = index + 1,
                    expected = %expected,
                    actual = %url,
                    "load does not follow the last navigation"
                );
            }
        }

        let (tx, mut feed) = change_feed();
        let interval = Duration::from_millis(load.render_interval_ms);
        tokio::spawn(async move {
            for markup in renders {
                tokio::time::sleep(interval).await;
                if tx.send(DocumentChange::new(markup)).is_err() {
                    break;
                }
            }
        });

        let report = reader.on_page_load(url, &markup, &mut feed).await;

        if load.activate_back && !reader.activate_back() {
            warn!(step = index + 1, "no back control to activate");
        }

        let navigations = reader.navigator_mut().take();
        expected_next = navigations.last().map(|n| n.url.clone());
        steps.push(ReplayStep {
            report,
            navigations,
            state: reader.state().snapshot(),
        });
    }

    Ok(ReplayReport { steps })
}

fn read_markup(base_dir: &Path, path: &Path) -> Result<String> {
    let full = base_dir.join(path);
    let markup = std::fs::read_to_string(&full)?;
    if markup.trim().is_empty() {
        return Err(ReaderError::MarkupError(format!(
            "{} is empty",
            full.display()
        )));
    }
    Ok(markup)
}
