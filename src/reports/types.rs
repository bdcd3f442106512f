//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Self-contained HTML page
    #[default]
    Html,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Report rendering options
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title; defaults to one built from the practice name
    pub title: Option<String>,
    /// Reviews listed in the report
    pub max_reviews: usize,
    /// Review text is cut after this many characters
    pub review_chars: usize,
    /// Pretty-print JSON
    pub pretty_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            max_reviews: 10,
            review_chars: 400,
            pretty_json: true,
        }
    }
}

impl ReportConfig {
    /// The configured title or one naming the practice.
    #[must_use]
    pub fn title_for(&self, practice_name: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Smile Score Report - {practice_name}"))
    }
}
