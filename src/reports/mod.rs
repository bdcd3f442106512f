//! Report generation for audit results.
//!
//! This module provides two output formats:
//! - HTML: a self-contained page for the practice
//! - JSON: structured data for programmatic integration
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! All user-controllable data (practice details, review text, scraped
//! values) must be escaped before embedding in HTML.

pub mod escape;
mod html;
mod json;
mod types;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use types::{ReportConfig, ReportFormat};

use crate::pipeline::AuditResult;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a report for one audit
    fn generate(&self, result: &AuditResult, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        result: &AuditResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_matches_format() {
        assert_eq!(create_reporter(ReportFormat::Html).format(), ReportFormat::Html);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
    }
}
