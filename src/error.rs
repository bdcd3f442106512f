//! Unified error types for smile-audit.
//!
//! Most failures in an audit never surface here: an unreachable website or a
//! failed Places lookup degrades that one signal to the sentinel. The errors
//! below cover what can stop a step of it: a source client that cannot be
//! built or called, invalid configuration, and output I/O. Report rendering
//! has its own [`ReportError`](crate::reports::ReportError).

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for smile-audit operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuditError {
    /// A collaborator (page fetch, Places, search, LLM) could not be used
    #[error("Source failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific source error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API returned status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials for {0}")]
    MissingCredentials(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for smile-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AuditError {
    /// Create a source error with context
    pub fn source(context: impl Into<String>, source: SourceErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create a source error for a non-success HTTP status
    pub fn api_status(context: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::source(
            context,
            SourceErrorKind::ApiStatus {
                status,
                message: message.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ConfigError> for AuditError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Every problem found, joined into one configuration error.
impl From<Vec<ConfigError>> for AuditError {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::source(
            "JSON deserialization",
            SourceErrorKind::InvalidResponse(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// producing a chain such as `"appending submission: writing row: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AuditError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AuditError, new_ctx: &str) -> AuditError {
    match err {
        AuditError::Source {
            context: existing,
            source,
        } => AuditError::Source {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AuditError::Io {
            path,
            message,
            source,
        } => AuditError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AuditError::Config(msg) => AuditError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as `"new: existing"`.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditError::api_status("places details", 403, "REQUEST_DENIED");
        let display = err.to_string();
        assert!(display.contains("places details"), "{display}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AuditError::io("/tmp/submissions.csv", io_err);
        assert!(err.to_string().contains("/tmp/submissions.csv"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(AuditError::source(
                "base",
                SourceErrorKind::NetworkError("timeout".to_string()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(AuditError::Source { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Source error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);
    }
}
