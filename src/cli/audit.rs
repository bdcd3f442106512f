//! Audit command handler.
//!
//! Implements the `audit` subcommand: validate the form, run the audit,
//! write the report and log the submission.

use crate::config::{AppConfig, SubmissionConfig, Validatable};
use crate::model::{AuditRequest, ContactForm};
use crate::pipeline::{
    AuditResult, Auditor, OutputTarget, auto_detect_format, exit_codes, write_output,
};
use crate::reports::create_reporter;
use crate::sources::{AnalysisCache, Sources};
use crate::submissions::{CsvSubmissionLog, SubmissionLog, SubmissionRecord};
use anyhow::{Context, Result};
use chrono::Utc;

/// Run the audit command, returning the desired exit code.
///
/// Form and configuration are both checked before any source is built, so
/// invalid input never reaches the network.
pub fn run_audit(form: ContactForm, config: &AppConfig, quiet: bool) -> Result<i32> {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            for err in &errors.0 {
                tracing::error!("Invalid {}", err);
            }
            return Ok(exit_codes::INVALID_INPUT);
        }
    };

    let config_errors = config.validate();
    if !config_errors.is_empty() {
        for err in &config_errors {
            tracing::error!("Invalid configuration: {}", err);
        }
        return Ok(exit_codes::INVALID_INPUT);
    }

    let sources = build_sources(config)?;
    run_audit_with(&request, config, sources, quiet)
}

/// Run an audit of a validated request against the given sources.
pub fn run_audit_with(
    request: &AuditRequest,
    config: &AppConfig,
    sources: Sources,
    quiet: bool,
) -> Result<i32> {
    let auditor = Auditor::new(sources, config.audit.to_options());
    let mut cache = AnalysisCache::new(config.audit.cache_capacity);
    let result = auditor.run(request, &mut cache);

    write_report(&result, config, quiet)?;

    if config.submissions.enabled {
        log_submission(request, &config.submissions);
    }

    if let Some(threshold) = config.audit.min_score
        && result.score.overall < threshold
    {
        tracing::error!(
            "Smile Score {:.1} is below minimum threshold {:.1}",
            result.score.overall,
            threshold
        );
        return Ok(exit_codes::BELOW_MIN_SCORE);
    }

    if !quiet {
        tracing::info!("Smile Score: {:.1}/100", result.score.overall);
    }
    Ok(exit_codes::SUCCESS)
}

/// Build the configured sources, or offline ones without the `network` feature.
pub fn build_sources(config: &AppConfig) -> Result<Sources> {
    #[cfg(feature = "network")]
    {
        Sources::from_config(&config.sources).context("failed to initialize sources")
    }
    #[cfg(not(feature = "network"))]
    {
        let _ = config;
        tracing::warn!("Built without the network feature; every source is unavailable");
        Ok(Sources::offline())
    }
}

fn write_report(result: &AuditResult, config: &AppConfig, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let reporter = create_reporter(format);
    tracing::debug!("Rendering {} report", reporter.format());

    let content = reporter
        .generate(result, &config.output.report)
        .context("failed to render report")?;
    write_output(&content, &target, quiet)
}

/// Append the request to the submission log. Failures are logged only.
fn log_submission(request: &AuditRequest, config: &SubmissionConfig) {
    let Some(offset) = config.offset() else {
        tracing::warn!(
            "Submission log offset {} minutes is out of range, skipping",
            config.utc_offset_minutes
        );
        return;
    };

    let log = CsvSubmissionLog::new(&config.path);
    let record = SubmissionRecord::new(request, Utc::now(), offset);
    match log.append(&record) {
        Ok(()) => tracing::debug!("Submission logged to {}", log.path().display()),
        Err(e) => tracing::warn!("Failed to write {} submission log: {}", log.name(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn form() -> ContactForm {
        ContactForm {
            website: "brightsmiles.example".to_string(),
            email: "front@brightsmiles.example".to_string(),
            phone: "(555) 010-2030".to_string(),
            practice_name: "Bright Smiles Dental".to_string(),
            address: "12 Main Street, Springfield".to_string(),
            ..ContactForm::default()
        }
    }

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.output.file = Some(dir.path().join("report.json"));
        config.submissions.path = dir.path().join("log.csv");
        config
    }

    #[test]
    fn test_invalid_form_exits_before_audit() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let bad = ContactForm {
            email: "not-an-email".to_string(),
            ..form()
        };
        let code = run_audit(bad, &config, true).unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
        assert!(!tmp.path().join("report.json").exists());
        assert!(!tmp.path().join("log.csv").exists());
    }

    #[test]
    fn test_invalid_config_exits_before_audit() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_in(&tmp);
        config.audit.time_budget_secs = 0;
        let code = run_audit(form(), &config, true).unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_offline_audit_writes_report_and_log() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let request = form().validate().unwrap();

        let code = run_audit_with(&request, &config, Sources::offline(), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let report = std::fs::read_to_string(tmp.path().join("report.json")).unwrap();
        assert!(report.contains("Bright Smiles Dental"));
        let log = std::fs::read_to_string(tmp.path().join("log.csv")).unwrap();
        assert_eq!(log.lines().count(), 2);
    }

    #[test]
    fn test_min_score_threshold() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_in(&tmp);
        config.audit.min_score = Some(50.0);
        config.submissions.enabled = false;
        let request = form().validate().unwrap();

        let code = run_audit_with(&request, &config, Sources::offline(), true).unwrap();
        assert_eq!(code, exit_codes::BELOW_MIN_SCORE);
        assert!(!tmp.path().join("log.csv").exists());
    }
}
