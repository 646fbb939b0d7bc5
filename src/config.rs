//! Static configuration compiled into the reader.
//!
//! Nothing here is adjustable at runtime: the thresholds belong to the keyword
//! model they were tuned against, and the storage keys must stay stable across
//! page loads of one browsing session.

use std::time::Duration;

/// A page is on-topic only with strictly more keyword matches than this
pub const MIN_MATCH_COUNT: usize = 10;

/// ...and a strictly higher average weight per match than this
pub const MIN_AVERAGE_WEIGHT: f64 = 500.0;

/// How long discovery keeps retrying on document changes after a page load
pub const OBSERVATION_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Session storage key holding the origin URL of the last redirect
pub const ORIGIN_URL_KEY: &str = "lastRecipeURL";

/// Session storage key holding the target URL of the last redirect
pub const REDIRECT_TARGET_KEY: &str = "lastPrintURL";

/// Session storage key set when the user came back through a back control
pub const RETURN_MARKER_KEY: &str = "recipeReaderGoBack";

/// Label of the injected fallback control on print pages
pub const FALLBACK_LABEL: &str = "\u{2190} Back to recipe";

/// Hosts that opted out: never scanned for a print link.
///
/// Web apps with their own print actions (mail, documents, maps) where a
/// redirect would break the app rather than help the reader.
pub const BLOCKED_HOSTNAMES: &[&str] = &[
    "mail.google.com",
    "docs.google.com",
    "drive.google.com",
    "maps.google.com",
    "calendar.google.com",
    "outlook.live.com",
    "outlook.office.com",
    "github.com",
    "gitlab.com",
    "web.whatsapp.com",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_hostnames_are_lowercase() {
        for host in BLOCKED_HOSTNAMES {
            assert_eq!(*host, host.to_lowercase());
        }
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_ne!(ORIGIN_URL_KEY, REDIRECT_TARGET_KEY);
        assert_ne!(ORIGIN_URL_KEY, RETURN_MARKER_KEY);
        assert_ne!(REDIRECT_TARGET_KEY, RETURN_MARKER_KEY);
    }
}
