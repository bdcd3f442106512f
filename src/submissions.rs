//! Submission log: one row per audit request.

use crate::error::{AuditError, ErrorContext, Result};
use crate::model::AuditRequest;
use chrono::{DateTime, FixedOffset, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column headers, in row order.
pub const COLUMNS: [&str; 7] = [
    "Website Link",
    "Doctor Name",
    "Email ID",
    "Phone Number",
    "Practice Name",
    "Address",
    "Timestamp",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub website: String,
    pub doctor_name: String,
    pub email: String,
    pub phone: String,
    pub practice_name: String,
    pub address: String,
    pub timestamp: String,
}

impl SubmissionRecord {
    /// Record a request at `at`, rendered in the given UTC offset.
    #[must_use]
    pub fn new(request: &AuditRequest, at: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            website: request.website().to_string(),
            doctor_name: request.doctor_name().unwrap_or_default().to_string(),
            email: request.email().to_string(),
            phone: request.phone().to_string(),
            practice_name: request.practice_name().to_string(),
            address: request.address().to_string(),
            timestamp: at.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Fields in [`COLUMNS`] order.
    #[must_use]
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.website,
            &self.doctor_name,
            &self.email,
            &self.phone,
            &self.practice_name,
            &self.address,
            &self.timestamp,
        ]
    }
}

/// Somewhere submissions are appended.
pub trait SubmissionLog {
    fn append(&self, record: &SubmissionRecord) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Appends rows to a CSV file, writing the header when the file is new.
#[derive(Debug, Clone)]
pub struct CsvSubmissionLog {
    path: PathBuf,
}

impl CsvSubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        std::fs::metadata(&self.path).map_or(true, |m| m.len() == 0)
    }
}

impl SubmissionLog for CsvSubmissionLog {
    fn append(&self, record: &SubmissionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AuditError::io(parent, e))?;
        }
        let write_header = self.needs_header();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AuditError::io(&self.path, e))?;

        let mut content = String::new();
        if write_header {
            content.push_str(&csv_row(&COLUMNS));
        }
        content.push_str(&csv_row(&record.fields()));
        file.write_all(content.as_bytes())
            .context("appending submission")?;
        tracing::debug!("Logged submission to {:?}", self.path);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

fn csv_row(fields: &[&str]) -> String {
    let cells: Vec<String> = fields
        .iter()
        .map(|f| format!("\"{}\"", escape_csv(f)))
        .collect();
    let mut row = cells.join(",");
    row.push('\n');
    row
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\r', '\n'], " ")
}
