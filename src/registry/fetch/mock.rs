//! In-memory transport for tests.
//!
//! # Example
//!
//! ```
//! use borrowr::registry::{MockTransport, RegistryTransport};
//!
//! let transport = MockTransport::new().with("https://x.dev/a.txt", "hello");
//! assert_eq!(transport.get_text("https://x.dev/a.txt").unwrap(), "hello");
//! assert!(transport.get_text("https://x.dev/b.txt").is_err());
//! assert_eq!(transport.requests(), vec!["https://x.dev/a.txt", "https://x.dev/b.txt"]);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};

use super::RegistryTransport;

/// Serves canned bodies by exact URL and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a transport with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for a URL.
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl RegistryTransport for MockTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(body) => Ok(body.clone()),
            None => bail!("HTTP 404 Not Found fetching {}", url),
        }
    }
}
