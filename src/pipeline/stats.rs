//! Audit run statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An optional stage that was not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkippedStage {
    /// LLM review theme analysis
    ThemeAnalysis,
    /// LLM recommendations
    LlmAdvice,
}

impl fmt::Display for SkippedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThemeAnalysis => write!(f, "theme analysis"),
            Self::LlmAdvice => write!(f, "LLM advice"),
        }
    }
}

/// Statistics from one audit run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    /// Calls made to external sources
    pub api_calls: usize,
    /// Review analyses served from the cache
    pub cache_hits: usize,
    /// Metrics that ended up as a sentinel
    pub degraded_signals: usize,
    /// Optional stages left out because the time budget ran out
    pub skipped_stages: Vec<SkippedStage>,
    /// Whether the time budget was exceeded at any point
    pub budget_exceeded: bool,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl AuditStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage skipped for lack of time.
    pub fn skip(&mut self, stage: SkippedStage) {
        self.budget_exceeded = true;
        if !self.skipped_stages.contains(&stage) {
            tracing::warn!("Time budget exceeded, skipping {}", stage);
            self.skipped_stages.push(stage);
        }
    }

    /// Log a summary of the audit
    pub fn log_summary(&self) {
        tracing::info!(
            "Audit complete: {} API calls, {} cache hits, {} degraded signals in {:?}",
            self.api_calls,
            self.cache_hits,
            self.degraded_signals,
            self.duration
        );
        for stage in &self.skipped_stages {
            tracing::warn!("Skipped: {}", stage);
        }
    }
}

/// Serde support for Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_records_stage_once() {
        let mut stats = AuditStats::new();
        stats.skip(SkippedStage::LlmAdvice);
        stats.skip(SkippedStage::LlmAdvice);
        assert_eq!(stats.skipped_stages, vec![SkippedStage::LlmAdvice]);
        assert!(stats.budget_exceeded);
    }

    #[test]
    fn test_duration_serializes_as_millis() {
        let stats = AuditStats {
            duration: Duration::from_millis(1500),
            ..AuditStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["duration"], 1500);

        let back: AuditStats = serde_json::from_value(json).unwrap();
        assert_eq!(back.duration, Duration::from_millis(1500));
    }
}
