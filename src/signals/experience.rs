//! Patient experience signals: booking and insurance.

use crate::model::{MetricValue, PageDocument};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const BOOKING_INTENT: &[&str] = &["book", "appointment", "schedule", "reserve"];
const BOOKING_TOOLS: &[&str] = &[
    "calendly",
    "zocdoc",
    "square appointments",
    "localmed",
    "nexhealth",
];

const INSURANCE_KEYWORDS: &[&str] = &["insurance", "we accept", "ppo", "delta dental"];

static INSURANCE_SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.]*insurance[^.]*\.").expect("static regex"));

/// How patients can book an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingMethod {
    /// A named scheduling tool is embedded or linked
    OnlineEmbedded,
    /// Booking language without a recognizable tool
    OnlineLinkOrForm,
    PhoneOnly,
}

impl BookingMethod {
    /// Classify from the page's visible text.
    #[must_use]
    pub fn detect(page: &PageDocument) -> Self {
        let text = page.text_lower();
        if !BOOKING_INTENT.iter().any(|kw| text.contains(kw)) {
            return Self::PhoneOnly;
        }
        let html = page.html_lower();
        if BOOKING_TOOLS
            .iter()
            .any(|tool| text.contains(tool) || html.contains(tool))
        {
            Self::OnlineEmbedded
        } else {
            Self::OnlineLinkOrForm
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OnlineEmbedded => "Online booking (embedded)",
            Self::OnlineLinkOrForm => "Online booking (link/form)",
            Self::PhoneOnly => "Phone-only or unclear",
        }
    }

    #[must_use]
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::OnlineEmbedded | Self::OnlineLinkOrForm)
    }

    #[must_use]
    pub fn to_metric(booking: Option<Self>) -> MetricValue {
        MetricValue::or_search_limited(booking, |b| MetricValue::label(b.label()))
    }
}

/// What the website says about accepted insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InsuranceClarity {
    /// The first sentence mentioning insurance
    Stated(String),
    /// Insurance keywords without a quotable sentence
    Mentioned,
    Unclear,
}

impl InsuranceClarity {
    #[must_use]
    pub fn detect(page: &PageDocument) -> Self {
        let text = page.text_lower();
        if !INSURANCE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            return Self::Unclear;
        }
        INSURANCE_SENTENCE_RE
            .find(text)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map_or(Self::Mentioned, |s| Self::Stated(s.to_string()))
    }

    #[must_use]
    pub const fn is_clear(&self) -> bool {
        !matches!(self, Self::Unclear)
    }

    #[must_use]
    pub fn to_metric(insurance: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(insurance, |i| match i {
            Self::Stated(sentence) => MetricValue::Label(sentence.clone()),
            Self::Mentioned => MetricValue::label("Mentioned on site"),
            Self::Unclear => MetricValue::label("Unclear"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDocument {
        PageDocument::parse("https://a.com", html)
    }

    #[test]
    fn test_booking_classification() {
        assert_eq!(
            BookingMethod::detect(&page(
                r#"<a href="https://www.zocdoc.com/practice/1">Book now</a>"#
            )),
            BookingMethod::OnlineEmbedded
        );
        assert_eq!(
            BookingMethod::detect(&page("<p>Request an appointment online</p>")),
            BookingMethod::OnlineLinkOrForm
        );
        assert_eq!(
            BookingMethod::detect(&page("<p>Call us today</p>")),
            BookingMethod::PhoneOnly
        );
        assert!(BookingMethod::OnlineEmbedded.is_online());
        assert!(!BookingMethod::PhoneOnly.is_online());
        assert!(BookingMethod::to_metric(None).is_sentinel());
    }

    #[test]
    fn test_insurance_sentence_is_quoted() {
        let clarity = InsuranceClarity::detect(&page(
            "<p>Welcome. We accept most insurance plans including Delta Dental. Call us.</p>",
        ));
        assert_eq!(
            clarity,
            InsuranceClarity::Stated("we accept most insurance plans including delta dental.".to_string())
        );
        assert!(clarity.is_clear());
    }

    #[test]
    fn test_insurance_mentioned_and_unclear() {
        let mentioned = InsuranceClarity::detect(&page("<p>PPO friendly office</p>"));
        assert_eq!(mentioned, InsuranceClarity::Mentioned);
        assert_eq!(
            InsuranceClarity::to_metric(Some(&mentioned)).to_string(),
            "Mentioned on site"
        );

        let unclear = InsuranceClarity::detect(&page("<p>Gentle care</p>"));
        assert!(!unclear.is_clear());
        assert_eq!(InsuranceClarity::to_metric(Some(&unclear)).to_string(), "Unclear");
    }
}
