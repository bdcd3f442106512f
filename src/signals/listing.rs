//! Signals read from the business listing.

use crate::model::{MetricValue, PlaceDetails};
use serde::Serialize;

const HOURS_POINTS: u32 = 20;
const PHOTOS_POINTS: u32 = 20;
const WEBSITE_POINTS: u32 = 15;
const PHONE_POINTS: u32 = 15;
const REVIEWS_POINTS: u32 = 10;
const CATEGORY_POINTS: u32 = 10;
const ADDRESS_POINTS: u32 = 10;

/// Estimated completeness of the business profile, out of 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GbpCompleteness {
    pub score: u32,
    pub checks: Vec<String>,
}

impl GbpCompleteness {
    #[must_use]
    pub fn assess(details: &PlaceDetails) -> Self {
        let mut score = 0;
        let mut checks = Vec::with_capacity(7);
        let mut check = |present: bool, points: u32, ok: String, missing: &str| {
            if present {
                score += points;
                checks.push(ok);
            } else {
                checks.push(missing.to_string());
            }
        };

        check(
            details.opening_hours.is_some(),
            HOURS_POINTS,
            "Hours ✅".to_string(),
            "Hours ❌",
        );
        check(
            !details.photos.is_empty(),
            PHOTOS_POINTS,
            format!("Photos ✅ ({})", details.photos.len()),
            "Photos ❌ (0)",
        );
        check(
            is_present(details.website.as_deref()),
            WEBSITE_POINTS,
            "Website ✅".to_string(),
            "Website ❌",
        );
        check(
            is_present(details.international_phone_number.as_deref()),
            PHONE_POINTS,
            "Phone ✅".to_string(),
            "Phone ❌",
        );
        check(
            details.rating.is_some_and(|r| r > 0.0) && details.user_ratings_total.unwrap_or(0) > 0,
            REVIEWS_POINTS,
            "Reviews ✅".to_string(),
            "Reviews ❌",
        );
        check(
            details.is_dental(),
            CATEGORY_POINTS,
            "Category ✅".to_string(),
            "Category ❌",
        );
        check(
            is_present(details.formatted_address.as_deref()),
            ADDRESS_POINTS,
            "Address ✅".to_string(),
            "Address ❌",
        );

        Self {
            score: score.min(100),
            checks,
        }
    }

    #[must_use]
    pub fn score_metric(gbp: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(gbp, |g| MetricValue::Percentage(g.score))
    }

    #[must_use]
    pub fn checks_metric(gbp: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(gbp, |g| MetricValue::Label(g.checks.join(" | ")))
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Average star rating, when the listing has one.
#[must_use]
pub fn rating(details: Option<&PlaceDetails>) -> Option<f64> {
    details.and_then(|d| d.rating)
}

/// Total number of ratings, when the listing reports it.
#[must_use]
pub fn review_count(details: Option<&PlaceDetails>) -> Option<u64> {
    details.and_then(|d| d.user_ratings_total)
}

/// Number of photos attached to the listing.
#[must_use]
pub fn photo_count(details: Option<&PlaceDetails>) -> Option<usize> {
    details.map(|d| d.photos.len())
}

/// Weekly opening hours as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeHours {
    pub weekday_text: Vec<String>,
}

impl OfficeHours {
    #[must_use]
    pub fn from_details(details: &PlaceDetails) -> Self {
        Self {
            weekday_text: details.weekday_hours().to_vec(),
        }
    }

    /// Whether any hours are listed. A listing without hours is a known
    /// absence, not a missing source.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.weekday_text.is_empty()
    }

    #[must_use]
    pub fn to_metric(hours: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(hours, |h| {
            if h.is_listed() {
                MetricValue::Label(h.weekday_text.join("; "))
            } else {
                MetricValue::label("Not listed")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpeningHours, PlacePhoto};

    fn photos(n: usize) -> Vec<PlacePhoto> {
        vec![PlacePhoto::default(); n]
    }

    #[test]
    fn test_partial_profile_scores_70() {
        let details = PlaceDetails {
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
                weekday_text: vec!["Monday: 9 AM – 5 PM".to_string()],
            }),
            photos: photos(12),
            website: Some("https://brightsmiles.com".to_string()),
            international_phone_number: Some("+1 555-123-4567".to_string()),
            ..PlaceDetails::default()
        };
        let gbp = GbpCompleteness::assess(&details);
        assert_eq!(gbp.score, 70);
        assert_eq!(GbpCompleteness::score_metric(Some(&gbp)).to_string(), "70/100");
        assert!(gbp.checks.contains(&"Photos ✅ (12)".to_string()));
        assert!(gbp.checks.contains(&"Category ❌".to_string()));
    }

    #[test]
    fn test_complete_profile_caps_at_100() {
        let details = PlaceDetails {
            opening_hours: Some(OpeningHours::default()),
            photos: photos(3),
            website: Some("https://a.com".to_string()),
            international_phone_number: Some("+1 555".to_string()),
            rating: Some(4.8),
            user_ratings_total: Some(90),
            types: vec!["dentist".to_string()],
            formatted_address: Some("1 Main St".to_string()),
            ..PlaceDetails::default()
        };
        assert_eq!(GbpCompleteness::assess(&details).score, 100);
    }

    #[test]
    fn test_reviews_need_a_count() {
        let details = PlaceDetails {
            rating: Some(4.0),
            user_ratings_total: Some(0),
            ..PlaceDetails::default()
        };
        assert_eq!(GbpCompleteness::assess(&details).score, 0);
    }

    #[test]
    fn test_failed_lookup_is_sentinel() {
        assert!(GbpCompleteness::score_metric(None).is_sentinel());
        assert!(GbpCompleteness::checks_metric(None).is_sentinel());
        assert_eq!(rating(None), None);
        assert!(OfficeHours::to_metric(None).is_sentinel());
    }

    #[test]
    fn test_missing_hours_are_known_absent() {
        let hours = OfficeHours::from_details(&PlaceDetails::default());
        assert!(!hours.is_listed());
        assert_eq!(OfficeHours::to_metric(Some(&hours)), MetricValue::label("Not listed"));
    }
}
