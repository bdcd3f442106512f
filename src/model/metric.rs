//! Metric values and the "Search limited" sentinel.
//!
//! Every cell of an audit section is a [`MetricValue`]. A value is either a
//! concrete observation or a [`Sentinel`] meaning the source could not be
//! consulted. The two must never be confused: "0 social platforms" is an
//! observation, "Search limited" is not.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for a metric whose source was unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentinel {
    /// Network/API failure, missing credentials, or field absent in the response
    SearchLimited,
    /// No website URL was available to inspect
    NoUrl,
}

impl Sentinel {
    /// Display text for this sentinel
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SearchLimited => "Search limited",
            Self::NoUrl => "No URL",
        }
    }

    /// Parse a sentinel from its exact display text
    #[must_use]
    pub fn from_display(s: &str) -> Option<Self> {
        match s {
            "Search limited" => Some(Self::SearchLimited),
            "No URL" => Some(Self::NoUrl),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metric value in an audit section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// Plain count or measurement (e.g. total reviews)
    Number(f64),
    /// Score out of 100, displayed as `"{n}/100"`
    Percentage(u32),
    /// Star rating out of 5, displayed as `"{r}/5"`
    Rating(f64),
    /// Free-form text (e.g. "Facebook, Instagram", "Phone-only or unclear")
    Label(String),
    /// Source unavailable
    Sentinel(Sentinel),
}

impl MetricValue {
    /// The generic "Search limited" sentinel
    pub const SEARCH_LIMITED: Self = Self::Sentinel(Sentinel::SearchLimited);

    /// Create a label value
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Map an optional observation to a value, using the generic sentinel for `None`
    pub fn or_search_limited<T>(value: Option<T>, f: impl FnOnce(T) -> Self) -> Self {
        value.map_or(Self::SEARCH_LIMITED, f)
    }

    /// Whether this value is a sentinel (structural check, never a substring match)
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }

    /// Numeric view of the value, if it has one.
    ///
    /// Labels are only numeric when they start with a number
    /// (e.g. `"12 photos, 0 videos"` yields `12.0`).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) | Self::Rating(n) => Some(*n),
            Self::Percentage(p) => Some(f64::from(*p)),
            Self::Label(s) => leading_number(s),
            Self::Sentinel(_) => None,
        }
    }

    /// Parse a canonical display string back into a value.
    ///
    /// Inverse of [`fmt::Display`] for every value this crate produces.
    #[must_use]
    pub fn from_display(s: &str) -> Self {
        if let Some(sentinel) = Sentinel::from_display(s) {
            return Self::Sentinel(sentinel);
        }
        if let Some(pct) = s.strip_suffix("/100")
            && is_plain_number(pct)
            && let Ok(p) = pct.parse::<u32>()
        {
            return Self::Percentage(p);
        }
        if let Some(rating) = s.strip_suffix("/5")
            && is_plain_number(rating)
            && let Ok(r) = rating.parse::<f64>()
        {
            return Self::Rating(r);
        }
        if is_plain_number(s)
            && let Ok(n) = s.parse::<f64>()
        {
            return Self::Number(n);
        }
        Self::Label(s.to_string())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Percentage(p) => write!(f, "{p}/100"),
            Self::Rating(r) => write!(f, "{r}/5"),
            Self::Label(s) => f.write_str(s),
            Self::Sentinel(s) => f.write_str(s.as_str()),
        }
    }
}

impl From<Sentinel> for MetricValue {
    fn from(s: Sentinel) -> Self {
        Self::Sentinel(s)
    }
}

/// Digits with at most one dot and an optional leading minus.
fn is_plain_number(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    !body.is_empty()
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().filter(|&c| c == '.').count() <= 1
        && body.chars().any(|c| c.is_ascii_digit())
}

fn leading_number(s: &str) -> Option<f64> {
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(s.len(), |(i, _)| i);
    let head = &s[..end];
    if is_plain_number(head) {
        head.parse().ok()
    } else {
        None
    }
}
