//! Per-metric recommendations.
//!
//! Advice comes from an [`AdviceGenerator`]. The rule table
//! ([`RuleBasedAdvisor`]) always answers; an LLM-backed generator
//! ([`LlmAdvisor`]) may be layered in front of it with [`FirstSuccess`].
//! Values that carry no information (sentinels, upstream API error text)
//! never get advice, whichever generator is configured.

mod llm;
mod rules;

pub use llm::{LlmAdvisor, MAX_ADVICE_CHARS};
pub use rules::RuleBasedAdvisor;

use crate::model::{MetricValue, Section};
use crate::strategy::FirstSuccess;
use indexmap::IndexMap;

/// Advice given when a metric needs no work.
pub const AFFIRMATION: &str = "You nailed it";

/// Display substrings that mark a value as an upstream error, not data.
pub const PROBLEM_MARKERS: &[&str] = &[
    "not available via places api",
    "request_denied",
    "invalid request",
    "permission denied",
    "zero_results",
];

/// Strategy for producing one recommendation.
pub trait AdviceGenerator {
    /// Advice for a metric, or `None` when this generator failed.
    /// An empty string is a valid answer meaning "no advice".
    fn generate(&self, metric: &str, value: &MetricValue) -> Option<String>;

    /// Generator name for logging
    fn name(&self) -> &'static str;
}

impl<P: AdviceGenerator, F: AdviceGenerator> AdviceGenerator for FirstSuccess<P, F> {
    fn generate(&self, metric: &str, value: &MetricValue) -> Option<String> {
        self.primary.generate(metric, value).or_else(|| {
            tracing::debug!(metric, "{} gave no advice, using {}", self.primary.name(), self.fallback.name());
            self.fallback.generate(metric, value)
        })
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}

/// Whether a value should never receive advice.
#[must_use]
pub fn is_non_actionable(value: &MetricValue) -> bool {
    if value.is_sentinel() {
        return true;
    }
    let display = value.to_string().to_lowercase();
    PROBLEM_MARKERS.iter().any(|m| display.contains(m))
}

/// Rule-based advice for one metric.
#[must_use]
pub fn advise(metric: &str, value: &MetricValue) -> String {
    if is_non_actionable(value) {
        return String::new();
    }
    RuleBasedAdvisor::advise(metric, value)
}

/// Applies a generator to metrics, guarding non-actionable values.
pub struct Advisor<'a> {
    generator: Box<dyn AdviceGenerator + 'a>,
}

impl<'a> Advisor<'a> {
    /// Rules only
    #[must_use]
    pub fn rule_based() -> Self {
        Self {
            generator: Box::new(RuleBasedAdvisor),
        }
    }

    /// `primary` first, rules when it fails
    #[must_use]
    pub fn with_primary<G: AdviceGenerator + 'a>(primary: G) -> Self {
        Self {
            generator: Box::new(FirstSuccess::new(primary, RuleBasedAdvisor)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.generator.name()
    }

    #[must_use]
    pub fn advise(&self, metric: &str, value: &MetricValue) -> String {
        if is_non_actionable(value) {
            return String::new();
        }
        self.generator.generate(metric, value).unwrap_or_default()
    }

    /// Advice for every metric of a section, in section order.
    #[must_use]
    pub fn advise_section(&self, section: &Section) -> IndexMap<String, String> {
        section
            .iter()
            .map(|(metric, value)| (metric.to_string(), self.advise(metric, value)))
            .collect()
    }
}

impl Default for Advisor<'_> {
    fn default() -> Self {
        Self::rule_based()
    }
}
