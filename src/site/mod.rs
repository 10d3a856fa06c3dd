//! # Site Access
//!
//! The blog is a static site; logshell only ever reads two JSON files from
//! it. A [`SiteFetcher`] hides whether those come over HTTP or from a built
//! site directory on disk.

mod dir;
mod http;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

pub use dir::DirFetcher;
pub use http::HttpFetcher;

/// Errors that can occur while fetching or decoding a site resource.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Status { status: u16, path: String },
    /// The resource does not exist in the site directory.
    NotFound(String),
    /// Local read failure other than not-found.
    Io(String),
    /// The body was not the JSON shape we expected.
    Parse(String),
    /// The background task laying out the resource died.
    Layout(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status, path } => write!(f, "HTTP {status} for {path}"),
            FetchError::NotFound(path) => write!(f, "not found: {path}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Layout(msg) => write!(f, "layout failed: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait SiteFetcher: Send + Sync {
    /// Human-readable origin, used in logs and for node links.
    fn origin(&self) -> &str;

    /// Reads the resource at `path` (site-absolute, e.g. `/pages/search.json`).
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Picks HTTP for `http://`/`https://` bases and a directory reader otherwise.
pub fn site_fetcher(base: &str) -> Arc<dyn SiteFetcher> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Arc::new(HttpFetcher::new(base.to_string()))
    } else {
        Arc::new(DirFetcher::new(base.into()))
    }
}

/// Fetches `path` and decodes it as JSON.
pub async fn fetch_json<T: serde::de::DeserializeOwned>(
    fetcher: &dyn SiteFetcher,
    path: &str,
) -> Result<T, FetchError> {
    let bytes = fetcher.fetch(path).await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
}
