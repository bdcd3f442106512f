//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{AuditRequest, MetricValue, PlaceReview, SectionKind};
use crate::pipeline::{AuditResult, AuditStats};
use crate::scoring::{SCORING_ENGINE_VERSION, ScoreInputs, ScoringWeights, SmileScore};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &AuditResult, config: &ReportConfig) -> Result<String, ReportError> {
        let report = JsonAuditReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                scoring_engine_version: SCORING_ENGINE_VERSION,
                generated_at: result.generated_at.to_rfc3339(),
                title: config.title_for(result.request.practice_name()),
            },
            practice: &result.request,
            maps_link: result.maps_link.as_deref(),
            score: &result.score,
            weights: &result.weights,
            score_inputs: &result.score_inputs,
            sections: result
                .sections
                .iter()
                .map(|section| JsonSection {
                    kind: section.kind(),
                    title: section.kind().title(),
                    metrics: section
                        .rows()
                        .map(|(name, value, advice)| JsonMetric {
                            name,
                            display: value.to_string(),
                            value,
                            recommendation: advice,
                        })
                        .collect(),
                })
                .collect(),
            reviews: &result.reviews[..result.reviews.len().min(config.max_reviews)],
            stats: &result.stats,
        };

        let json = if self.pretty && config.pretty_json {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonAuditReport<'a> {
    metadata: JsonReportMetadata,
    practice: &'a AuditRequest,
    maps_link: Option<&'a str>,
    score: &'a SmileScore,
    weights: &'a ScoringWeights,
    score_inputs: &'a ScoreInputs,
    sections: Vec<JsonSection<'a>>,
    reviews: &'a [PlaceReview],
    stats: &'a AuditStats,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    scoring_engine_version: &'static str,
    generated_at: String,
    title: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    kind: SectionKind,
    title: &'static str,
    metrics: Vec<JsonMetric<'a>>,
}

#[derive(Serialize)]
struct JsonMetric<'a> {
    name: &'a str,
    value: &'a MetricValue,
    display: String,
    recommendation: &'a str,
}
