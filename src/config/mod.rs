//! Configuration module for smile-audit.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//!
//! # Configuration File
//!
//! Place a `.smile-audit.yaml` file in the working directory or
//! `~/.config/smile-audit/`:
//!
//! ```yaml
//! audit:
//!   time_budget_secs: 45
//!   ai_advice: false
//! submissions:
//!   path: logs/submissions.csv
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{
    ConfigPreset, DEFAULT_CACHE_CAPACITY, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
    DEFAULT_SUBMISSION_LOG, DEFAULT_TIME_BUDGET_SECS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_UTC_OFFSET_MINUTES,
};
pub use types::{AppConfig, AuditConfig, OutputConfig, SourcesConfig, SubmissionConfig};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.smile-audit.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
