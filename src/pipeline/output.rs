//! Output handling for audit reports.
//!
//! Provides utilities for picking the report format and writing reports.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::File(p) => Some(p),
            OutputTarget::Stdout => None,
        }
    }
}

/// Pick the report format when none was requested.
///
/// A `.json` output file gets JSON; everything else gets HTML.
pub fn auto_detect_format(format: Option<ReportFormat>, target: &OutputTarget) -> ReportFormat {
    format.unwrap_or_else(|| {
        let is_json = target
            .path()
            .and_then(Path::extension)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            ReportFormat::Json
        } else {
            ReportFormat::Html
        }
    })
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{}", content);
            Ok(())
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            if !quiet {
                tracing::info!("Report written to {:?}", path);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option_none() {
        let target = OutputTarget::from_option(None);
        assert!(matches!(target, OutputTarget::Stdout));
    }

    #[test]
    fn test_output_target_from_option_some() {
        let path = PathBuf::from("/tmp/report.html");
        let target = OutputTarget::from_option(Some(path.clone()));
        match target {
            OutputTarget::File(p) => assert_eq!(p, path),
            _ => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_explicit_format_wins() {
        let target = OutputTarget::File(PathBuf::from("/tmp/report.html"));
        assert_eq!(
            auto_detect_format(Some(ReportFormat::Json), &target),
            ReportFormat::Json
        );
    }

    #[test]
    fn test_format_from_extension() {
        let json = OutputTarget::File(PathBuf::from("/tmp/report.JSON"));
        assert_eq!(auto_detect_format(None, &json), ReportFormat::Json);
        assert_eq!(
            auto_detect_format(None, &OutputTarget::Stdout),
            ReportFormat::Html
        );
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("audit.html");
        write_output("<html></html>", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
