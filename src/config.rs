// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Everything the crawler needs to know is collected into one CrawlConfig
// value that is built once (from the command line) and handed to the
// Crawler. Nothing here is global or mutable after construction.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Folder pages are written to when no --output-dir is given
pub const DEFAULT_OUTPUT_DIR: &str = "crawled_pages";

/// How many link hops from the start page we follow by default
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// How long a page gets to produce a <body> element
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 10;

/// Substrings that keep a page from being saved when they appear in its
/// derived filename. Matching is case-sensitive.
pub const DEFAULT_SAVE_DENYLIST: &[&str] = &["cookie", "privacy", "legal"];

/// Path extensions we never hand to the fetcher (compared lowercase)
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg"];

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: Url,
    pub output_dir: PathBuf,
    pub max_depth: usize,
    pub page_timeout: Duration,
    pub save_denylist: Vec<String>,
    pub skip_extensions: Vec<String>,
}

impl CrawlConfig {
    /// Builds a config with default filters.
    ///
    /// Fails if the start URL does not parse, is not http(s), or has no host
    /// (a crawl without a network location has no "same domain").
    pub fn new(start_url: &str, output_dir: impl Into<PathBuf>, max_depth: usize) -> Result<Self> {
        let start_url = Url::parse(start_url)
            .with_context(|| format!("Invalid URL '{}'", start_url))?;

        if start_url.scheme() != "http" && start_url.scheme() != "https" {
            return Err(anyhow!(
                "Start URL must be http or https, got '{}'",
                start_url.scheme()
            ));
        }

        if start_url.host_str().is_none() {
            return Err(anyhow!("URL has no host: {}", start_url));
        }

        Ok(Self {
            start_url,
            output_dir: output_dir.into(),
            max_depth,
            page_timeout: Duration::from_secs(DEFAULT_PAGE_TIMEOUT_SECS),
            save_denylist: DEFAULT_SAVE_DENYLIST.iter().map(|s| s.to_string()).collect(),
            skip_extensions: DEFAULT_SKIP_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }
}
