//! Configuration validation for smile-audit.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, AuditConfig, OutputConfig, SourcesConfig, SubmissionConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Like [`validate`](Self::validate), as a single error listing every problem.
    fn check(&self) -> crate::error::Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.sources.validate());
        errors.extend(self.audit.validate());
        errors.extend(self.output.validate());
        errors.extend(self.submissions.validate());
        errors
    }
}

impl Validatable for SourcesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "sources.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        if self.llm_timeout_secs == 0 {
            errors.push(ConfigError::new(
                "sources.llm_timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        if self.llm_model.trim().is_empty() {
            errors.push(ConfigError::new("sources.llm_model", "Model name is empty"));
        }
        if self.search_api_key.is_some() != self.search_engine_id.is_some() {
            errors.push(ConfigError::new(
                "sources.search_engine_id",
                "Custom search needs both an API key and an engine id",
            ));
        }
        errors
    }
}

impl Validatable for AuditConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.time_budget_secs == 0 {
            errors.push(ConfigError::new(
                "audit.time_budget_secs",
                "Time budget must be at least 1 second",
            ));
        }
        if self.ai_themes && self.max_reviews == 0 {
            errors.push(ConfigError::new(
                "audit.max_reviews",
                "LLM theme analysis needs at least one review",
            ));
        }
        if let Some(min) = self.min_score
            && !(0.0..=100.0).contains(&min)
        {
            errors.push(ConfigError::new(
                "audit.min_score",
                format!("Minimum score must be between 0 and 100, got {min}"),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref file_path) = self.file
            && file_path.as_os_str().is_empty()
        {
            errors.push(ConfigError::new("output.file", "Output path is empty"));
        }
        if self.report.review_chars == 0 {
            errors.push(ConfigError::new(
                "output.report.review_chars",
                "Review length limit must be positive",
            ));
        }
        errors
    }
}

impl Validatable for SubmissionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.enabled && self.path.as_os_str().is_empty() {
            errors.push(ConfigError::new("submissions.path", "Log path is empty"));
        }
        if self.offset().is_none() {
            errors.push(ConfigError::new(
                "submissions.utc_offset_minutes",
                format!(
                    "Offset must be within +/-24h, got {} minutes",
                    self.utc_offset_minutes
                ),
            ));
        }
        errors
    }
}
