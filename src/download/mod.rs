//! Asset fetching.
//!
//! One asset at a time, in manifest order. Remote URLs go through a
//! blocking HTTP client with a capped redirect budget and a per-request
//! timeout; data URIs are decoded in place and never touch the network.
//! A failed fetch is an error for that asset only - the run continues.

mod data_uri;

pub use data_uri::is_data_uri;

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect;
use thiserror::Error;

use crate::config::DownloadConfig;

/// Per-asset fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP status (redirects are handled by the client).
    #[error("http status {0}")]
    Status(reqwest::StatusCode),

    /// Transport failure, including an exhausted redirect budget.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed or unsupported data URI.
    #[error("invalid data uri: {0}")]
    DataUri(String),

    /// Local write failure.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Blocking asset fetcher with a courtesy delay between downloads.
pub struct Fetcher {
    client: Client,
    delay: Duration,
}

impl Fetcher {
    /// Build the HTTP client. Redirects beyond the configured budget fail
    /// the asset explicitly instead of recursing forever.
    pub fn new(config: &DownloadConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    /// Fetch `src` into `dest`. The caller decides about existing files;
    /// this always writes.
    pub fn fetch(&self, src: &str, dest: &Path) -> Result<(), FetchError> {
        if is_data_uri(src) {
            let bytes = data_uri::decode(src)?;
            std::fs::write(dest, bytes)?;
            return Ok(());
        }

        let mut response = self.client.get(src).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let mut file = File::create(dest)?;
        response.copy_to(&mut file)?;
        Ok(())
    }

    /// Sleep between downloads so the legacy host is not hammered.
    /// A courtesy pause, not a retry/backoff mechanism.
    pub fn courtesy_delay(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fetcher() -> Fetcher {
        Fetcher::new(&DownloadConfig {
            delay_ms: 0,
            ..DownloadConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fetch_data_uri_writes_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("pixel.gif");

        // 1x1 GIF
        let uri = "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";
        fetcher().fetch(uri, &dest).unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");
    }

    #[test]
    fn test_fetch_bad_data_uri_is_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("broken.jpg");

        let result = fetcher().fetch("data:image/jpeg;base64,@@@", &dest);
        assert!(matches!(result, Err(FetchError::DataUri(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn test_courtesy_delay_zero_is_noop() {
        // Should return immediately
        fetcher().courtesy_delay();
    }
}
