//! `[download]` section configuration.

use serde::Deserialize;

/// Downloader behavior.
///
/// # Example
///
/// ```toml
/// [download]
/// delay_ms = 200
/// max_redirects = 5
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadConfig {
    /// Courtesy delay between successive downloads, in milliseconds.
    /// Not a backoff: there is no retry on failure.
    pub delay_ms: u64,

    /// Redirect hops to follow before failing the asset.
    pub max_redirects: usize,

    /// Per-request timeout in seconds. A hung remote fails one asset, not
    /// the whole run.
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200,
            max_redirects: 5,
            timeout_secs: 30,
        }
    }
}
