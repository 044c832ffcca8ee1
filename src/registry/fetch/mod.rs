//! Registry transport.
//!
//! Everything the registry needs from the network is a text `GET`. The
//! [`RegistryTransport`] trait is that seam: [`HttpFetcher`] talks HTTP(S),
//! [`MockTransport`] serves canned responses in tests.

pub mod http;
pub mod mock;

pub use http::HttpFetcher;
pub use mock::MockTransport;

use anyhow::Result;

/// Retrieves text documents by URL.
///
/// Implementations must be shareable across threads; file downloads for a
/// resolved tree run concurrently.
pub trait RegistryTransport: Send + Sync {
    /// Fetch the body at `url` as text.
    fn get_text(&self, url: &str) -> Result<String>;
}

/// Join a base URL and a relative path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
