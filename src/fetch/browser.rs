// src/fetch/browser.rs
// =============================================================================
// Fetches pages with a headless Chrome driven over the DevTools protocol.
//
// One browser and one tab are launched when the crawl starts and reused for
// every page. chromiumoxide hands us a Handler stream that must be polled
// for the connection to make progress, so it runs on its own tokio task
// for the lifetime of the fetcher.
//
// Rust concepts:
// - tokio::spawn: run the handler loop in the background
// - tokio::time::timeout: bound how long a single page may take
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use super::{FetchError, Fetcher};

// How often we look for <body> while a page is loading
const BODY_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct BrowserFetcher {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    page_timeout: Duration,
}

impl BrowserFetcher {
    /// Launches Chrome and opens the tab every page will be loaded in.
    ///
    /// This is the only fetcher failure that aborts a crawl: without a
    /// browser there is nothing to crawl with.
    pub async fn launch(headless: bool, page_timeout: Duration) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(1280, 1024)
            .request_timeout(page_timeout)
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-dev-shm-usage");

        if !headless {
            builder = builder.with_head();
        }

        let config = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {}", e))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| anyhow!("Failed to launch Chrome: {}", e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // Chrome is already running: shut it down before bailing out
                if let Err(close_err) = shutdown(&mut browser, &handler).await {
                    tracing::debug!(error = %close_err, "closing chrome after failed launch");
                }
                return Err(anyhow!("Failed to open a browser tab: {}", e));
            }
        };

        tracing::info!(headless, timeout = ?page_timeout, "browser launched");

        Ok(Self {
            browser,
            page,
            handler,
            page_timeout,
        })
    }
}

// Closes Chrome, reaps the child process and stops the handler task.
// The child is reaped and the task stopped even if the close command fails.
async fn shutdown(browser: &mut Browser, handler: &JoinHandle<()>) -> Result<(), FetchError> {
    let closed = browser
        .close()
        .await
        .map_err(|e| FetchError::Driver(e.to_string()));

    if let Err(e) = browser.wait().await {
        tracing::debug!(error = %e, "waiting for chrome to exit failed");
    }
    handler.abort();

    closed.map(|_| ())
}

// Polls until the document has a <body>. Callers bound this with a timeout.
async fn wait_for_body(page: &Page) {
    while page.find_element("body").await.is_err() {
        tokio::time::sleep(BODY_POLL_INTERVAL).await;
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn load(&mut self, url: &Url) -> Result<String, FetchError> {
        let page = &self.page;

        let loaded = tokio::time::timeout(self.page_timeout, async {
            page.goto(url.as_str())
                .await
                .map_err(|e| FetchError::navigation(url, e))?;
            wait_for_body(page).await;
            Ok::<(), FetchError>(())
        })
        .await;

        match loaded {
            Err(_) => return Err(FetchError::timeout(url, self.page_timeout)),
            Ok(result) => result?,
        }

        page.content()
            .await
            .map_err(|e| FetchError::Driver(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        shutdown(&mut self.browser, &self.handler).await
    }
}
