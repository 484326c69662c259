// src/fetch/http.rs
// =============================================================================
// Fetches pages with a plain HTTP GET.
//
// No JavaScript runs, so this only suits server-rendered sites, but it needs
// no Chrome installation. The same client is reused for every request
// (connection pooling).
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{FetchError, Fetcher};

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    // Sorts a reqwest failure into our error kinds
    fn classify(&self, url: &Url, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(url, self.timeout)
        } else {
            FetchError::navigation(url, error)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn load(&mut self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|e| self.classify(url, e))
    }

    // Nothing to release: the connection pool goes away with the client
    async fn close(&mut self) -> Result<(), FetchError> {
        Ok(())
    }
}
