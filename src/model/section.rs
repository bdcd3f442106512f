//! Audit sections: named, ordered metric tables.

use super::MetricValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric names, in the order they appear in their sections.
pub mod names {
    pub const GBP_COMPLETENESS: &str = "GBP Completeness (estimate)";
    pub const GBP_SIGNALS: &str = "GBP Signals";
    pub const SEARCH_VISIBILITY: &str = "Search Visibility (Page 1?)";
    pub const WEBSITE_HEALTH_SCORE: &str = "Website Health Score";
    pub const WEBSITE_HEALTH_CHECKS: &str = "Website Health Checks";
    pub const SOCIAL_PRESENCE: &str = "Social Media Presence";

    pub const GOOGLE_RATING: &str = "Google Reviews (Avg)";
    pub const TOTAL_REVIEWS: &str = "Total Google Reviews";
    pub const SENTIMENT: &str = "Sentiment Highlights";
    pub const TOP_POSITIVE: &str = "Top Positive Themes";
    pub const TOP_NEGATIVE: &str = "Top Negative Themes";

    pub const WEBSITE_MEDIA: &str = "Photos/Videos on Website";
    pub const GOOGLE_PHOTOS: &str = "Photos count in Google";
    pub const ADVERTISING: &str = "Advertising Scripts Detected";

    pub const BOOKING: &str = "Appointment Booking";
    pub const OFFICE_HOURS: &str = "Office Hours";
    pub const INSURANCE: &str = "Insurance Acceptance";
}

/// The four audit dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Visibility,
    Reputation,
    Marketing,
    Experience,
}

impl SectionKind {
    /// All kinds in display order
    pub const ALL: [Self; 4] = [
        Self::Visibility,
        Self::Reputation,
        Self::Marketing,
        Self::Experience,
    ];

    /// Heading used in reports
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Visibility => "Visibility",
            Self::Reputation => "Reputation",
            Self::Marketing => "Marketing",
            Self::Experience => "Patient Experience",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An ordered mapping of metric name to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub metrics: IndexMap<String, MetricValue>,
}

impl Section {
    #[must_use]
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            metrics: IndexMap::new(),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: &str, value: MetricValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a metric. Replacing keeps the original position.
    pub fn insert(&mut self, name: &str, value: MetricValue) {
        self.metrics.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Names of metrics whose source was unavailable
    pub fn sentinel_metrics(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, v)| v.is_sentinel())
            .map(|(k, _)| k)
    }

    /// Render every value to its display string, preserving order.
    #[must_use]
    pub fn to_display(&self) -> IndexMap<String, String> {
        self.metrics
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Rebuild a section from a display mapping.
    #[must_use]
    pub fn from_display(kind: SectionKind, display: &IndexMap<String, String>) -> Self {
        Self {
            kind,
            metrics: display
                .iter()
                .map(|(k, v)| (k.clone(), MetricValue::from_display(v)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentinel;

    fn sample() -> Section {
        Section::new(SectionKind::Visibility)
            .with(names::GBP_COMPLETENESS, MetricValue::Percentage(70))
            .with(names::GBP_SIGNALS, MetricValue::label("Hours ✅ | Photos ✅ (12)"))
            .with(names::SEARCH_VISIBILITY, MetricValue::SEARCH_LIMITED)
            .with(names::WEBSITE_HEALTH_CHECKS, Sentinel::NoUrl.into())
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let section = sample();
        let keys: Vec<_> = section.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                names::GBP_COMPLETENESS,
                names::GBP_SIGNALS,
                names::SEARCH_VISIBILITY,
                names::WEBSITE_HEALTH_CHECKS
            ]
        );
    }

    #[test]
    fn test_display_round_trip_keeps_sentinels() {
        let section = sample();
        let display = section.to_display();
        assert_eq!(display[names::SEARCH_VISIBILITY], "Search limited");
        assert_eq!(display[names::WEBSITE_HEALTH_CHECKS], "No URL");

        let rebuilt = Section::from_display(SectionKind::Visibility, &display);
        assert_eq!(rebuilt, section);
    }

    #[test]
    fn test_sentinel_metrics() {
        let section = sample();
        let degraded: Vec<_> = section.sentinel_metrics().collect();
        assert_eq!(
            degraded,
            vec![names::SEARCH_VISIBILITY, names::WEBSITE_HEALTH_CHECKS]
        );
    }
}
