//! Rule table for per-metric advice.

use super::{AFFIRMATION, AdviceGenerator};
use crate::model::MetricValue;
use crate::signals::SocialPlatform;

/// A rule fires when its needle occurs in the lowercased metric name.
struct Rule {
    needle: &'static str,
    advise: fn(&MetricValue, &str) -> String,
}

/// First match wins, so more specific needles come first.
const RULES: &[Rule] = &[
    Rule {
        needle: "website health score",
        advise: website_health,
    },
    Rule {
        needle: "gbp completeness",
        advise: gbp_completeness,
    },
    Rule {
        needle: "search visibility",
        advise: search_visibility,
    },
    Rule {
        needle: "social media presence",
        advise: social_presence,
    },
    Rule {
        needle: "google reviews (avg)",
        advise: rating,
    },
    Rule {
        needle: "total google reviews",
        advise: review_count,
    },
    Rule {
        needle: "appointment booking",
        advise: booking,
    },
    Rule {
        needle: "office hours",
        advise: office_hours,
    },
    Rule {
        needle: "insurance acceptance",
        advise: insurance,
    },
    Rule {
        needle: "sentiment highlights",
        advise: sentiment,
    },
    Rule {
        needle: "top positive themes",
        advise: positive_themes,
    },
    Rule {
        needle: "top negative themes",
        advise: negative_themes,
    },
    Rule {
        needle: "photos/videos on website",
        advise: photos,
    },
    Rule {
        needle: "photos count in google",
        advise: photos,
    },
    Rule {
        needle: "advertising scripts",
        advise: advertising,
    },
];

/// Canned advice keyed by metric name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    /// Advice for a metric; empty when no rule applies.
    #[must_use]
    pub fn advise(metric: &str, value: &MetricValue) -> String {
        let metric = metric.to_lowercase();
        let display = value.to_string().trim().to_lowercase();
        RULES
            .iter()
            .find(|rule| metric.contains(rule.needle))
            .map(|rule| (rule.advise)(value, &display))
            .unwrap_or_default()
    }

    /// Number of rules in the table
    #[must_use]
    pub fn rule_count() -> usize {
        RULES.len()
    }
}

impl AdviceGenerator for RuleBasedAdvisor {
    fn generate(&self, metric: &str, value: &MetricValue) -> Option<String> {
        Some(Self::advise(metric, value))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

fn nailed_or(ok: bool, advice: &str) -> String {
    if ok { AFFIRMATION } else { advice }.to_string()
}

fn website_health(value: &MetricValue, _: &str) -> String {
    nailed_or(
        value.as_f64().is_some_and(|p| p >= 90.0),
        "Improve HTTPS/mobile/speed",
    )
}

fn gbp_completeness(value: &MetricValue, _: &str) -> String {
    nailed_or(
        value.as_f64().is_some_and(|p| p >= 90.0),
        "Add hours, photos, website, phone on GBP",
    )
}

fn search_visibility(_: &MetricValue, display: &str) -> String {
    nailed_or(display.contains("yes"), "Improve local SEO & citations")
}

fn social_presence(_: &MetricValue, display: &str) -> String {
    let missing: Vec<&str> = SocialPlatform::ALL
        .iter()
        .filter(|p| !display.contains(&p.name().to_lowercase()))
        .map(SocialPlatform::name)
        .collect();
    if missing.is_empty() {
        AFFIRMATION.to_string()
    } else if missing.len() == SocialPlatform::ALL.len() {
        "Add FB/IG links; post 2–3×/week".to_string()
    } else {
        format!("Add {} & post weekly", missing.join(", "))
    }
}

fn rating(value: &MetricValue, _: &str) -> String {
    match value.as_f64() {
        Some(r) if r >= 4.6 => AFFIRMATION.to_string(),
        Some(r) if r >= 4.0 => "Ask happy patients for reviews to reach 4.6+".to_string(),
        Some(_) => "Address negatives & request fresh 5★ reviews".to_string(),
        None => String::new(),
    }
}

fn review_count(value: &MetricValue, _: &str) -> String {
    match value.as_f64() {
        Some(n) if n >= 300.0 => AFFIRMATION.to_string(),
        Some(n) if n >= 100.0 => "Run a monthly review drive to hit 300".to_string(),
        Some(_) => "Launch QR/SMS review ask at checkout".to_string(),
        None => String::new(),
    }
}

fn booking(_: &MetricValue, display: &str) -> String {
    nailed_or(
        display.contains("online booking"),
        "Add an online booking link/button",
    )
}

fn office_hours(_: &MetricValue, display: &str) -> String {
    if display == "not listed" {
        "Add office hours to your Google Business Profile".to_string()
    } else {
        "Offer evenings/weekends to boost conversions".to_string()
    }
}

fn insurance(_: &MetricValue, display: &str) -> String {
    nailed_or(
        !display.contains("unclear"),
        "Publish accepted plans on site & GBP",
    )
}

fn sentiment(_: &MetricValue, display: &str) -> String {
    if display.contains("mostly positive") {
        AFFIRMATION.to_string()
    } else if display.contains("mixed") {
        "Fix top negatives & reply to reviews".to_string()
    } else {
        "Reply to negative themes with solutions".to_string()
    }
}

fn positive_themes(_: &MetricValue, display: &str) -> String {
    if display.contains("none detected") {
        String::new()
    } else {
        "Amplify these themes on website & ads".to_string()
    }
}

fn negative_themes(_: &MetricValue, display: &str) -> String {
    let advice = if display.contains("none detected") {
        AFFIRMATION
    } else if display.contains("long wait") {
        "Stagger scheduling & add SMS reminders"
    } else if display.contains("billing") {
        "Clarify estimates & billing SOP"
    } else if display.contains("front desk") {
        "Train front desk on empathy scripts"
    } else {
        "Tackle top 1–2 negative themes this month"
    };
    advice.to_string()
}

fn photos(value: &MetricValue, display: &str) -> String {
    let has_photos = !display.starts_with("none") && value.as_f64().is_some_and(|n| n > 0.0);
    nailed_or(has_photos, "Upload 10–20 clinic & team photos")
}

fn advertising(_: &MetricValue, display: &str) -> String {
    nailed_or(
        !display.contains("none"),
        "Add GA4/Ads pixel for conversion tracking",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::names;

    fn advise(metric: &str, value: MetricValue) -> String {
        RuleBasedAdvisor::advise(metric, &value)
    }

    #[test]
    fn test_rule_table_covers_every_advised_metric() {
        assert_eq!(RuleBasedAdvisor::rule_count(), 15);
    }

    #[test]
    fn test_threshold_rules() {
        assert_eq!(advise(names::WEBSITE_HEALTH_SCORE, MetricValue::Percentage(100)), AFFIRMATION);
        assert_eq!(
            advise(names::WEBSITE_HEALTH_SCORE, MetricValue::Percentage(67)),
            "Improve HTTPS/mobile/speed"
        );
        assert_eq!(
            advise(names::GBP_COMPLETENESS, MetricValue::Percentage(70)),
            "Add hours, photos, website, phone on GBP"
        );
        assert_eq!(advise(names::GOOGLE_RATING, MetricValue::Rating(4.7)), AFFIRMATION);
        assert_eq!(
            advise(names::GOOGLE_RATING, MetricValue::Rating(4.2)),
            "Ask happy patients for reviews to reach 4.6+"
        );
        assert_eq!(
            advise(names::GOOGLE_RATING, MetricValue::Rating(3.1)),
            "Address negatives & request fresh 5★ reviews"
        );
        assert_eq!(
            advise(names::TOTAL_REVIEWS, MetricValue::Number(150.0)),
            "Run a monthly review drive to hit 300"
        );
        assert_eq!(
            advise(names::TOTAL_REVIEWS, MetricValue::Number(12.0)),
            "Launch QR/SMS review ask at checkout"
        );
    }

    #[test]
    fn test_social_advice_names_missing_platforms() {
        assert_eq!(
            advise(
                names::SOCIAL_PRESENCE,
                MetricValue::label("Facebook, Instagram, Twitter, Yelp")
            ),
            AFFIRMATION
        );
        assert_eq!(
            advise(names::SOCIAL_PRESENCE, MetricValue::label("Facebook, Instagram")),
            "Add Twitter, Yelp & post weekly"
        );
        assert_eq!(
            advise(names::SOCIAL_PRESENCE, MetricValue::label("None")),
            "Add FB/IG links; post 2–3×/week"
        );
    }

    #[test]
    fn test_theme_rules() {
        assert_eq!(
            advise(names::TOP_NEGATIVE, MetricValue::label("long wait (3); billing issues (1)")),
            "Stagger scheduling & add SMS reminders"
        );
        assert_eq!(advise(names::TOP_NEGATIVE, MetricValue::label("None detected")), AFFIRMATION);
        assert_eq!(advise(names::TOP_POSITIVE, MetricValue::label("None detected")), "");
        assert_eq!(
            advise(names::SENTIMENT, MetricValue::label("Mixed with notable concerns (4 negatives vs 1 positives)")),
            "Fix top negatives & reply to reviews"
        );
    }

    #[test]
    fn test_photo_counts_are_numeric() {
        assert_eq!(
            advise(names::WEBSITE_MEDIA, MetricValue::label("10 photos, 0 videos")),
            AFFIRMATION
        );
        assert_eq!(
            advise(names::WEBSITE_MEDIA, MetricValue::label("0 photos, 2 videos")),
            "Upload 10–20 clinic & team photos"
        );
        assert_eq!(advise(names::GOOGLE_PHOTOS, MetricValue::Number(0.0)), "Upload 10–20 clinic & team photos");
    }

    #[test]
    fn test_unmatched_metric_has_no_advice() {
        assert_eq!(advise(names::GBP_SIGNALS, MetricValue::label("Hours ✅")), "");
        assert_eq!(advise(names::WEBSITE_HEALTH_CHECKS, MetricValue::label("HTTPS ✅")), "");
    }
}
