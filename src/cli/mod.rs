//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod audit;
mod prefill;
mod score;

pub use audit::{build_sources, run_audit, run_audit_with};
pub use prefill::run_prefill;
pub use score::{ScoreArgs, run_score};
