//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".smile-audit.yaml",
    ".smile-audit.yml",
    "smile-audit.yaml",
    "smile-audit.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/smile-audit/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    // 2. Search current directory
    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    // 3. Search user config directory
    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("smile-audit"))
    {
        return Some(path);
    }

    // 4. Search home directory
    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# smile-audit configuration
# =========================
#
# Place this file at:
#   - .smile-audit.yaml in the working directory
#   - ~/.config/smile-audit/smile-audit.yaml for global config
#
# CLI flags and environment variables always override file settings.
# Prefer GOOGLE_PLACES_API_KEY, GOOGLE_CSE_API_KEY, GOOGLE_CSE_CX and
# ANTHROPIC_API_KEY over writing keys into this file.

# External sources
sources:
  # Timeout for website, Places and search requests (seconds)
  timeout_secs: 10
  # places_api_key: ...
  # search_api_key: ...
  # search_engine_id: ...
  # anthropic_api_key: ...
  llm_model: claude-3-5-haiku-latest
  llm_timeout_secs: 15

# Audit behavior
audit:
  # LLM stages are skipped once this many seconds have passed
  time_budget_secs: 60
  # LLM review themes (keyword counts are the fallback)
  ai_themes: true
  # LLM recommendations (rule table is the fallback)
  ai_advice: true
  max_reviews: 10
  cache_capacity: 64
  # Exit with code 1 when the Smile Score is lower
  # min_score: 60

# Report output
output:
  # Format: html, json (default: from the file extension, else html)
  # format: html
  # file: report.html
  report:
    # title: Smile Score Report
    max_reviews: 10
    review_chars: 400
    pretty_json: true

# Submission log
submissions:
  enabled: true
  path: submissions.csv
  # Timestamp offset from UTC in minutes (330 = +05:30)
  utc_offset_minutes: 330
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
