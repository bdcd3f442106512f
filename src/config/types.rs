//! Configuration types for smile-audit.

use super::defaults::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_SUBMISSION_LOG,
    DEFAULT_TIME_BUDGET_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_UTC_OFFSET_MINUTES,
};
use crate::pipeline::{AuditOptions, DEFAULT_MAX_REVIEWS};
use crate::reports::{ReportConfig, ReportFormat};
use crate::scoring::ScoringWeights;
use chrono::FixedOffset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags and environment variables override values from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// External sources and their credentials
    pub sources: SourcesConfig,
    /// Audit behavior
    pub audit: AuditConfig,
    /// Report output
    pub output: OutputConfig,
    /// Submission log
    pub submissions: SubmissionConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with API keys masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        let mask = |key: &mut Option<String>| {
            if key.as_deref().is_some_and(|k| !k.is_empty()) {
                *key = Some("***".to_string());
            }
        };
        mask(&mut config.sources.places_api_key);
        mask(&mut config.sources.search_api_key);
        mask(&mut config.sources.anthropic_api_key);
        config
    }
}

// ============================================================================
// Sources
// ============================================================================

/// External source settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourcesConfig {
    /// Timeout for page, Places and search requests (seconds)
    pub timeout_secs: u64,
    /// Google Places API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places_api_key: Option<String>,
    /// Google Custom Search API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,
    /// Google Custom Search engine id (cx)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine_id: Option<String>,
    /// Anthropic API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    /// Model used for themes and advice
    pub llm_model: String,
    /// Timeout for LLM requests (seconds)
    pub llm_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            places_api_key: None,
            search_api_key: None,
            search_engine_id: None,
            anthropic_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl SourcesConfig {
    /// Replace keys that were given on the command line or in the environment.
    pub fn override_keys(
        &mut self,
        places: Option<String>,
        search: Option<String>,
        engine_id: Option<String>,
        anthropic: Option<String>,
    ) {
        let set = |slot: &mut Option<String>, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                *slot = Some(v);
            }
        };
        set(&mut self.places_api_key, places);
        set(&mut self.search_api_key, search);
        set(&mut self.search_engine_id, engine_id);
        set(&mut self.anthropic_api_key, anthropic);
    }
}

// ============================================================================
// Audit
// ============================================================================

/// Audit behavior.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuditConfig {
    /// Wall-clock budget per audit (seconds); LLM stages are skipped after it
    pub time_budget_secs: u64,
    /// Use the LLM for review themes
    pub ai_themes: bool,
    /// Use the LLM for recommendations
    pub ai_advice: bool,
    /// Reviews sent to the LLM
    pub max_reviews: usize,
    /// Review analyses kept in memory
    pub cache_capacity: usize,
    /// Exit non-zero when the Smile Score is below this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            ai_themes: true,
            ai_advice: true,
            max_reviews: DEFAULT_MAX_REVIEWS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            min_score: None,
        }
    }
}

impl AuditConfig {
    /// Pipeline options for these settings.
    #[must_use]
    pub fn to_options(&self) -> AuditOptions {
        AuditOptions {
            time_budget: Duration::from_secs(self.time_budget_secs),
            ai_themes: self.ai_themes,
            ai_advice: self.ai_advice,
            max_reviews: self.max_reviews,
            weights: ScoringWeights::STANDARD,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Report output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format; picked from the file extension when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    /// Output file path (stdout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Report rendering
    pub report: ReportConfig,
}

// ============================================================================
// Submissions
// ============================================================================

/// Submission log settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Append a row per audit
    pub enabled: bool,
    /// CSV file path
    pub path: PathBuf,
    /// Timestamp offset from UTC in minutes
    pub utc_offset_minutes: i32,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_SUBMISSION_LOG),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl SubmissionConfig {
    /// Timestamp offset, `None` when out of range.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}
