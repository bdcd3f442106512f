//! Pipeline orchestration for audits.
//!
//! This module runs the fetch → extract → score → advise flow under a time
//! budget and writes the rendered report, keeping the CLI handlers thin.

mod audit;
mod budget;
mod output;
mod stats;

pub use audit::{AuditOptions, AuditResult, Auditor, DEFAULT_MAX_REVIEWS, SectionResult};
pub use budget::{DEFAULT_TIME_BUDGET, Deadline};
pub use output::{OutputTarget, auto_detect_format, write_output};
pub use stats::{AuditStats, SkippedStage};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - audit completed (and met --min-score, if given)
    pub const SUCCESS: i32 = 0;
    /// The Smile Score fell below --min-score
    pub const BELOW_MIN_SCORE: i32 = 1;
    /// The contact form failed validation
    pub const INVALID_INPUT: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
