//! Default values and presets for smile-audit.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, AuditConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// LLM enrichment on, standard time budget
    Standard,
    /// No LLM calls: keyword themes and rule-based advice only
    RulesOnly,
    /// Longer budget and more reviews sent for analysis
    Thorough,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::RulesOnly => "rules-only",
            Self::Thorough => "thorough",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "standard" | "default" => Some(Self::Standard),
            "rules-only" | "rules" | "no-ai" => Some(Self::RulesOnly),
            "thorough" | "full" => Some(Self::Thorough),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "LLM themes and advice when a key is configured, 60s budget",
            Self::RulesOnly => "Keyword themes and rule-based advice, no LLM calls",
            Self::Thorough => "LLM enrichment with a 120s budget and up to 20 reviews",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::RulesOnly, Self::Thorough]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create a configuration from a preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a preset's audit settings, leaving credentials and output alone.
    pub fn apply_preset(&mut self, preset: ConfigPreset) {
        match preset {
            ConfigPreset::Standard => self.audit = AuditConfig::default(),
            ConfigPreset::RulesOnly => {
                self.audit.ai_themes = false;
                self.audit.ai_advice = false;
            }
            ConfigPreset::Thorough => {
                self.audit.ai_themes = true;
                self.audit.ai_advice = true;
                self.audit.time_budget_secs = 120;
                self.audit.max_reviews = 20;
            }
        }
    }
}

// ============================================================================
// Default Constants
// ============================================================================

/// Default HTTP timeout for page, Places and search requests (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP timeout for LLM requests (seconds).
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 15;

/// Default LLM model.
pub const DEFAULT_LLM_MODEL: &str = "claude-3-5-haiku-latest";

/// Default wall-clock budget per audit (seconds).
pub const DEFAULT_TIME_BUDGET_SECS: u64 = 60;

/// Default number of review analyses kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Default submission log file.
pub const DEFAULT_SUBMISSION_LOG: &str = "submissions.csv";

/// Default submission timestamp offset from UTC (minutes). +05:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
