//! Prefill command handler.
//!
//! Suggests contact form values from a practice website.

use crate::config::AppConfig;
use crate::pipeline::{AuditOptions, Auditor, exit_codes};
use crate::signals::prefill::Prefill;
use crate::sources::Sources;
use anyhow::Result;

/// Run the prefill command, printing suggestions to stdout.
pub fn run_prefill(website: &str, config: &AppConfig, sources: Sources, json: bool) -> Result<i32> {
    if website.trim().is_empty() {
        tracing::error!("Invalid website: required");
        return Ok(exit_codes::INVALID_INPUT);
    }

    let options = AuditOptions {
        ai_themes: false,
        ai_advice: false,
        ..config.audit.to_options()
    };
    let prefill = Auditor::new(sources, options).prefill(website);
    println!("{}", render(&prefill, json)?);
    Ok(exit_codes::SUCCESS)
}

fn render(prefill: &Prefill, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(prefill)?);
    }
    let line = |label: &str, value: &Option<String>| {
        format!("{label:<14} {}", value.as_deref().unwrap_or("-"))
    };
    Ok([
        line("Practice name:", &prefill.practice_name),
        line("Address:", &prefill.address),
        line("Maps link:", &prefill.maps_link),
    ]
    .join("\n"))
}
