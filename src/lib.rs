//! **Online presence audits for dental practices.**
//!
//! `smile-audit` takes a practice's contact details, looks at its website,
//! its Google Business listing and its local search visibility, and turns
//! what it finds into a four-section report with a per-metric
//! recommendation and a **Smile Score** out of 100.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: request, fetched data and the [`MetricValue`] every
//!   signal ends up as. A signal whose source was unavailable is the
//!   *Search limited* sentinel, never an error.
//! - **[`signals`]**: pure extractors from fetched data to typed signals,
//!   and the aggregation into ordered [`Section`]s.
//! - **[`scoring`]**: the Smile Score, three weighted sub-scores that
//!   leave unknown signals out of their averages.
//! - **[`advisory`]**: rule-based recommendations, optionally rewritten by
//!   an LLM with the rules as fallback.
//! - **[`sources`]**: the collaborator traits (page fetch, place lookup,
//!   web search, text analysis), their HTTP clients and the review
//!   analysis cache.
//! - **[`pipeline`]**: the [`Auditor`], which runs an audit under a
//!   wall-clock budget.
//! - **[`reports`]**: HTML and JSON renderers.
//!
//! ## Getting Started
//!
//! ```no_run
//! use smile_audit::{AnalysisCache, AuditOptions, Auditor, ContactForm, Sources};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ContactForm {
//!         website: "brightsmiles.example".to_string(),
//!         email: "front@brightsmiles.example".to_string(),
//!         phone: "555-010-2030".to_string(),
//!         practice_name: "Bright Smiles Dental".to_string(),
//!         address: "12 Main Street, Springfield".to_string(),
//!         ..ContactForm::default()
//!     }
//!     .validate()?;
//!
//!     let auditor = Auditor::new(Sources::offline(), AuditOptions::default());
//!     let result = auditor.run(&request, &mut AnalysisCache::new(16));
//!     println!("Smile Score: {}/100", result.score.overall);
//!     Ok(())
//! }
//! ```
//!
//! ## Scoring Without an Audit
//!
//! ```
//! use smile_audit::{ScoreInputs, compute_score};
//!
//! let score = compute_score(&ScoreInputs {
//!     rating: Some(4.5),
//!     review_count: Some(250),
//!     ..ScoreInputs::default()
//! });
//! assert_eq!(score.visibility, 0.0);
//! assert_eq!(score.reputation, 28.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `network` (default): HTTP clients for the page fetch, Google Places,
//!   Google Custom Search and the Anthropic Messages API. Without it every
//!   source is unavailable and audits run on whatever the caller supplies.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod advisory;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod signals;
pub mod sources;
pub mod strategy;
pub mod submissions;

// Re-export main types for convenience
pub use advisory::{AdviceGenerator, Advisor, LlmAdvisor, RuleBasedAdvisor, advise};
pub use config::{AppConfig, ConfigError, ConfigPreset, Validatable};
pub use error::{AuditError, ErrorContext, Result};
pub use model::{
    AuditRequest, ContactForm, MetricValue, Section, SectionKind, Sentinel, ValidationErrors,
};
pub use pipeline::{AuditOptions, AuditResult, AuditStats, Auditor, Deadline};
pub use reports::{HtmlReporter, JsonReporter, ReportConfig, ReportFormat, ReportGenerator};
pub use scoring::{ScoreInputs, ScoringWeights, SmileScore, SmileScorer, compute_score};
pub use signals::{AuditSignals, ReviewInsights, SourceData, ThemeAnalyzer};
pub use sources::{AnalysisCache, PageFetcher, PlaceLookup, Sources, TextAnalysis, WebSearch};
pub use strategy::FirstSuccess;
pub use submissions::{CsvSubmissionLog, SubmissionLog, SubmissionRecord};
