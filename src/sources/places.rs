//! Google Places client.
//!
//! Uses the legacy JSON endpoints: text search and find-place to resolve a
//! place id, then details for the listing itself.

use super::PlaceLookup;
use crate::error::{AuditError, Result, SourceErrorKind};
use crate::model::PlaceDetails;
use crate::model::url::domain_of;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DETAILS_FIELDS: &str = "name,place_id,formatted_address,international_phone_number,website,\
opening_hours,photos,rating,user_ratings_total,types,reviews";

#[derive(Debug, Clone)]
pub struct PlacesClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for PlacesClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://maps.googleapis.com/maps/api/place".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<Candidate>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetails>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Places statuses that mean "no match" rather than failure.
fn is_empty_status(status: &str) -> bool {
    status == "ZERO_RESULTS" || status == "NOT_FOUND"
}

fn network_error(msg: &str, err: &reqwest::Error) -> AuditError {
    AuditError::source(msg, SourceErrorKind::NetworkError(err.to_string()))
}

fn status_error(context: &str, status: &str, message: Option<String>) -> AuditError {
    AuditError::source(
        context,
        SourceErrorKind::InvalidResponse(match message {
            Some(m) => format!("{status}: {m}"),
            None => status.to_string(),
        }),
    )
}

/// HTTP client for the Places API.
pub struct PlacesClient {
    client: Client,
    config: PlacesClientConfig,
}

impl PlacesClient {
    pub fn new(config: PlacesClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AuditError::source(
                "Places client",
                SourceErrorKind::MissingCredentials("Google Places".to_string()),
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

    fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{endpoint}/json", self.config.api_base);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .map_err(|e| network_error("Places request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::api_status(
                format!("Places {endpoint}"),
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        response
            .json::<T>()
            .map_err(|e| AuditError::source("Places response", SourceErrorKind::InvalidResponse(e.to_string())))
    }

    /// First place id from a text search.
    pub fn text_search(&self, query: &str) -> Result<Option<String>> {
        let response: TextSearchResponse = self.get("textsearch", &[("query", query)])?;
        match response.status.as_str() {
            "OK" => Ok(response.results.into_iter().find_map(|c| c.place_id)),
            s if is_empty_status(s) => Ok(None),
            s => Err(status_error("Places text search", s, response.error_message)),
        }
    }

    /// First place id from find-place.
    pub fn find_place(&self, query: &str) -> Result<Option<String>> {
        let response: FindPlaceResponse = self.get(
            "findplacefromtext",
            &[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "place_id"),
            ],
        )?;
        match response.status.as_str() {
            "OK" => Ok(response.candidates.into_iter().find_map(|c| c.place_id)),
            s if is_empty_status(s) => Ok(None),
            s => Err(status_error("Places find place", s, response.error_message)),
        }
    }

    /// Full listing details.
    pub fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let response: DetailsResponse = self.get(
            "details",
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        match (response.status.as_str(), response.result) {
            ("OK", Some(details)) => Ok(details),
            (s, _) => Err(status_error("Places details", s, response.error_message)),
        }
    }
}

/// Queries tried in order: name with address, name alone, then the domain.
fn candidate_queries(name: &str, address: &str, website: &str) -> Vec<String> {
    let name = name.trim();
    let address = address.trim();
    let mut queries = Vec::with_capacity(3);
    if !name.is_empty() && !address.is_empty() {
        queries.push(format!("{name} {address}"));
    }
    if !name.is_empty() {
        queries.push(name.to_string());
    }
    if let Some(domain) = domain_of(website) {
        queries.push(domain);
    }
    queries
}

impl PlaceLookup for PlacesClient {
    fn find_place_id(&self, name: &str, address: &str, website: &str) -> Option<String> {
        let queries = candidate_queries(name, address, website);
        let searches: [(&str, fn(&Self, &str) -> Result<Option<String>>); 2] = [
            ("text search", Self::text_search),
            ("find place", Self::find_place),
        ];
        for (label, search) in searches {
            for query in &queries {
                match search(self, query) {
                    Ok(Some(id)) => {
                        tracing::debug!("Places {} matched {:?}", label, query);
                        return Some(id);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("{}", e),
                }
            }
        }
        None
    }

    fn details(&self, place_id: &str) -> Option<PlaceDetails> {
        self.place_details(place_id)
            .map_err(|e| tracing::warn!("{}", e))
            .ok()
    }

    fn name(&self) -> &'static str {
        "google-places"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_queries_order() {
        assert_eq!(
            candidate_queries("Bright Smiles", "1 Main St", "https://www.brightsmiles.com"),
            vec![
                "Bright Smiles 1 Main St".to_string(),
                "Bright Smiles".to_string(),
                "brightsmiles.com".to_string()
            ]
        );
        assert_eq!(
            candidate_queries("", "", "https://brightsmiles.com"),
            vec!["brightsmiles.com".to_string()]
        );
    }

    #[test]
    fn test_details_response_parses() {
        let json = r#"{"status":"OK","result":{"name":"Bright","rating":4.5,"user_ratings_total":10}}"#;
        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.result.unwrap().rating, Some(4.5));
    }

    #[test]
    fn test_missing_key_is_rejected() {
        assert!(PlacesClient::new(PlacesClientConfig::default()).is_err());
    }
}
