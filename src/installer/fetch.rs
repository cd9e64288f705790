//! Bootstrapper download.
//!
//! Provides the [`Downloader`] seam and the production [`HttpDownloader`],
//! which streams a single GET response to a writer.

use reqwest::blocking::Client;
use std::io::Write;
use std::time::Duration;

use crate::error::{Result, RuntimeError};

/// Streams the body of a URL into a writer.
pub trait Downloader {
    /// Fetch `url` and copy the body into `dest`, returning the byte count.
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64>;
}

/// Fetches over HTTP/HTTPS with `reqwest`.
///
/// No retry. The timeout is unbounded unless one is configured.
pub struct HttpDownloader {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpDownloader {
    /// Create a downloader with no timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a downloader with an optional overall request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("webview2-runtime/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        let network = |message: String| RuntimeError::Network {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .copy_to(dest)
            .map_err(|e| network(e.to_string()))?;
        tracing::debug!(url, bytes, "downloaded bootstrapper");
        Ok(bytes)
    }
}
