//! Google Custom Search client.

use super::WebSearch;
use crate::error::{AuditError, Result, SourceErrorKind};
use crate::model::SearchHit;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// One page of results.
const RESULTS_PER_PAGE: &str = "10";

#[derive(Debug, Clone)]
pub struct CustomSearchClientConfig {
    pub api_base: String,
    pub api_key: String,
    /// Programmable search engine id (`cx`)
    pub engine_id: String,
    pub timeout: Duration,
}

impl Default for CustomSearchClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: String::new(),
            engine_id: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

pub struct CustomSearchClient {
    client: Client,
    config: CustomSearchClientConfig,
}

fn network_error(msg: &str, err: &reqwest::Error) -> AuditError {
    AuditError::source(msg, SourceErrorKind::NetworkError(err.to_string()))
}

impl CustomSearchClient {
    pub fn new(config: CustomSearchClientConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.engine_id.is_empty() {
            return Err(AuditError::source(
                "Custom search client",
                SourceErrorKind::MissingCredentials("Google Custom Search".to_string()),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;
        Ok(Self { client, config })
    }

    /// First page of results for a query.
    pub fn query(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(&self.config.api_base)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
                ("num", RESULTS_PER_PAGE),
            ])
            .send()
            .map_err(|e| network_error("Search request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuditError::api_status(
                "Custom search",
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        let parsed: SearchResponse = response.json().map_err(|e| {
            AuditError::source("Search response", SourceErrorKind::InvalidResponse(e.to_string()))
        })?;
        Ok(parsed.items)
    }
}

impl WebSearch for CustomSearchClient {
    fn search(&self, query: &str) -> Option<Vec<SearchHit>> {
        match self.query(query) {
            Ok(hits) => {
                tracing::debug!("Search {:?} returned {} results", query, hits.len());
                Some(hits)
            }
            Err(e) => {
                tracing::warn!("Search unavailable: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "google-cse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_items_is_empty_page() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"kind":"customsearch#search"}"#).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_items_parse_into_hits() {
        let parsed: SearchResponse = serde_json::from_str(
            r#"{"items":[{"title":"Bright Smiles","link":"https://brightsmiles.com","snippet":"Dentist","displayLink":"brightsmiles.com"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.items[0].link, "https://brightsmiles.com");
    }

    #[test]
    fn test_credentials_required() {
        assert!(CustomSearchClient::new(CustomSearchClientConfig::default()).is_err());
    }
}
