//! Website fetcher.

use super::PageFetcher;
use crate::error::{AuditError, Result, SourceErrorKind};
use crate::model::{FetchedPage, PageDocument};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};

/// Sites commonly refuse non-browser agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct PageFetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for PageFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Fetches pages over HTTP(S), timing the request.
pub struct HttpPageFetcher {
    client: Client,
}

fn network_error(msg: &str, err: &reqwest::Error) -> AuditError {
    AuditError::source(msg, SourceErrorKind::NetworkError(err.to_string()))
}

impl HttpPageFetcher {
    pub fn new(config: PageFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;
        Ok(Self { client })
    }

    fn try_fetch(&self, url: &str) -> Result<(String, Duration)> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network_error("Website request failed", &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuditError::api_status(
                "Website request",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        let body = response
            .text()
            .map_err(|e| network_error("Failed to read website body", &e))?;
        Ok((body, started.elapsed()))
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> FetchedPage {
        match self.try_fetch(url) {
            Ok((html, elapsed)) => {
                tracing::debug!("Fetched {} ({} bytes) in {:.2?}", url, html.len(), elapsed);
                FetchedPage::loaded(PageDocument::parse(url, html), elapsed)
            }
            Err(e) => {
                tracing::warn!("Website unavailable: {}", e);
                FetchedPage::unavailable()
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
