//! External data sources.
//!
//! Each collaborator the audit talks to sits behind a trait so the pipeline
//! can run against HTTP clients, test fakes or nothing at all. None of the
//! trait methods return errors: a source that cannot answer returns `None`
//! (or an unloaded page) and the signals that depend on it degrade to the
//! "Search limited" sentinel.
//!
//! The HTTP implementations live behind the `network` feature.

mod cache;
#[cfg(feature = "network")]
mod fetch;
#[cfg(feature = "network")]
mod llm;
#[cfg(feature = "network")]
mod places;
#[cfg(feature = "network")]
mod search;

pub use cache::{AnalysisCache, CacheKey, CacheStats};
#[cfg(feature = "network")]
pub use fetch::{HttpPageFetcher, PageFetcherConfig};
#[cfg(feature = "network")]
pub use llm::{AnthropicClient, AnthropicClientConfig};
#[cfg(feature = "network")]
pub use places::{PlacesClient, PlacesClientConfig};
#[cfg(feature = "network")]
pub use search::{CustomSearchClient, CustomSearchClientConfig};

use crate::model::{FetchedPage, PlaceDetails, SearchHit};

/// Fetches the practice website.
pub trait PageFetcher {
    /// Fetch a page. Anything other than HTTP 200 yields an unloaded page.
    fn fetch(&self, url: &str) -> FetchedPage;

    fn name(&self) -> &'static str;
}

/// Business listing lookup.
pub trait PlaceLookup {
    /// Best matching place id for the practice.
    fn find_place_id(&self, name: &str, address: &str, website: &str) -> Option<String>;

    /// Listing details for a place id.
    fn details(&self, place_id: &str) -> Option<PlaceDetails>;

    fn name(&self) -> &'static str;

    /// Whether credentials are configured
    fn is_available(&self) -> bool {
        true
    }
}

/// First-page web search.
pub trait WebSearch {
    /// Top results for a query, `None` when search failed.
    fn search(&self, query: &str) -> Option<Vec<SearchHit>>;

    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }
}

/// Free-text completion by a language model.
pub trait TextAnalysis {
    /// Complete a prompt, `None` on any failure.
    fn complete(&self, prompt: &str) -> Option<String>;

    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }
}

/// A source that is not configured.
///
/// Implements every collaborator trait (Null Object pattern): pages are
/// never loaded and lookups always come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl PageFetcher for Unavailable {
    fn fetch(&self, _url: &str) -> FetchedPage {
        FetchedPage::unavailable()
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

impl PlaceLookup for Unavailable {
    fn find_place_id(&self, _name: &str, _address: &str, _website: &str) -> Option<String> {
        None
    }

    fn details(&self, _place_id: &str) -> Option<PlaceDetails> {
        None
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

impl WebSearch for Unavailable {
    fn search(&self, _query: &str) -> Option<Vec<SearchHit>> {
        None
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

impl TextAnalysis for Unavailable {
    fn complete(&self, _prompt: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// The set of collaborators an audit uses.
pub struct Sources {
    pub pages: Box<dyn PageFetcher>,
    pub places: Box<dyn PlaceLookup>,
    pub search: Box<dyn WebSearch>,
    pub analysis: Box<dyn TextAnalysis>,
}

impl Sources {
    /// No external access at all
    #[must_use]
    pub fn offline() -> Self {
        Self {
            pages: Box::new(Unavailable),
            places: Box::new(Unavailable),
            search: Box::new(Unavailable),
            analysis: Box::new(Unavailable),
        }
    }

    #[must_use]
    pub fn with_pages(mut self, pages: impl PageFetcher + 'static) -> Self {
        self.pages = Box::new(pages);
        self
    }

    #[must_use]
    pub fn with_places(mut self, places: impl PlaceLookup + 'static) -> Self {
        self.places = Box::new(places);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl WebSearch + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: impl TextAnalysis + 'static) -> Self {
        self.analysis = Box::new(analysis);
        self
    }

    /// Build HTTP clients from configuration. Sources without credentials
    /// stay [`Unavailable`]; an invalid configuration is rejected.
    #[cfg(feature = "network")]
    pub fn from_config(config: &crate::config::SourcesConfig) -> crate::error::Result<Self> {
        use crate::config::Validatable;
        use crate::error::ErrorContext;

        config.check().context("building sources")?;
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let mut sources = Self::offline().with_pages(HttpPageFetcher::new(PageFetcherConfig {
            timeout,
            ..PageFetcherConfig::default()
        })?);

        match config.places_api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                sources = sources.with_places(PlacesClient::new(PlacesClientConfig {
                    api_key: key.to_string(),
                    timeout,
                    ..PlacesClientConfig::default()
                })?);
            }
            None => tracing::info!("No Places API key configured, listing signals will be limited"),
        }

        match (
            config.search_api_key.as_deref().filter(|k| !k.is_empty()),
            config.search_engine_id.as_deref().filter(|k| !k.is_empty()),
        ) {
            (Some(key), Some(cx)) => {
                sources = sources.with_search(CustomSearchClient::new(CustomSearchClientConfig {
                    api_key: key.to_string(),
                    engine_id: cx.to_string(),
                    timeout,
                    ..CustomSearchClientConfig::default()
                })?);
            }
            _ => tracing::info!("No search credentials configured, search visibility will be limited"),
        }

        if let Some(key) = config.anthropic_api_key.as_deref().filter(|k| !k.is_empty()) {
            sources = sources.with_analysis(AnthropicClient::new(AnthropicClientConfig {
                api_key: key.to_string(),
                model: config.llm_model.clone(),
                timeout: std::time::Duration::from_secs(config.llm_timeout_secs),
                ..AnthropicClientConfig::default()
            })?);
        }

        Ok(sources)
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self::offline()
    }
}
