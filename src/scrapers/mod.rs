//! Transport and page parsing for the news search listing.
//!
//! Each concern lives in its own submodule:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`daum`] | Search URL construction, listing item discovery, per-item field extraction |
//! | [`article`] | On-demand full-body fetch for a single record |
//!
//! All network access goes through the [`ListingSource`] trait so that the
//! collector can be driven by canned pages in tests. [`HttpSource`] is the
//! production implementation.
//!
//! Failures are never fatal here: callers receive a [`FetchError`] and decide
//! whether to skip the page or substitute a placeholder.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

pub mod article;
pub mod daum;

/// User-Agent sent with every request unless overridden in settings.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Transport-level failure for one page or one article body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(StatusCode),
    #[error("record has no link to fetch")]
    MissingLink,
}

/// Anything that can turn a URL into an HTML document.
pub trait ListingSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP source that issues one request at a time with a short timeout.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client that identifies as `user_agent` and gives up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ListingSource for HttpSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
