// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into rendered HTML.
//
// Submodules:
// - browser: drives a real Chrome (JavaScript runs, SPA pages render)
// - http: a plain GET for sites that don't need a browser
//
// The crawler only sees the Fetcher trait, so tests can plug in a scripted
// fetcher and never touch the network.
// =============================================================================

mod browser;
mod http;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Why a single page could not be fetched.
///
/// None of these stop the crawl; the crawler logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out after {waited:?} waiting for {url}")]
    Timeout { url: String, waited: Duration },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("browser driver error: {0}")]
    Driver(String),
}

impl FetchError {
    pub fn navigation(url: &Url, message: impl ToString) -> Self {
        Self::Navigation {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn timeout(url: &Url, waited: Duration) -> Self {
        Self::Timeout {
            url: url.to_string(),
            waited,
        }
    }
}

/// A stateful page loader that is reused for every page of a crawl.
///
/// `load` blocks until the page has a body (or the fetcher's wait runs out).
/// `close` releases whatever the fetcher holds; the crawler calls it exactly
/// once, after the last page.
#[async_trait]
pub trait Fetcher: Send {
    async fn load(&mut self, url: &Url) -> Result<String, FetchError>;

    async fn close(&mut self) -> Result<(), FetchError>;
}
