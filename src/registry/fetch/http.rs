//! HTTP registry transport.
//!
//! Blocking reqwest client shared by index and file downloads.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use super::RegistryTransport;

/// Per-request timeout, covering connect through body read.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches registry documents over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a 30-second request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("borrowr/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl RegistryTransport for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }
}
