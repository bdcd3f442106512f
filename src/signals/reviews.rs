//! Review sentiment and recurring themes.
//!
//! Two analyzers exist: a keyword counter that always produces a result
//! for non-empty input, and an LLM-backed analyzer that may fail. They are
//! composed with [`FirstSuccess`] so the keyword path is the fallback.

use crate::model::{MetricValue, PlaceReview};
use crate::sources::TextAnalysis;
use crate::strategy::FirstSuccess;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const POSITIVE_THEMES: &[(&str, &[&str])] = &[
    (
        "friendly staff",
        &["friendly", "kind", "caring", "nice", "welcoming", "courteous"],
    ),
    ("cleanliness", &["clean", "hygienic", "spotless"]),
    (
        "pain-free experience",
        &["painless", "no pain", "gentle", "pain free", "comfortable"],
    ),
    ("professionalism", &["professional", "expert", "knowledgeable"]),
    (
        "communication",
        &["explained", "explain", "transparent", "informative"],
    ),
];

const NEGATIVE_THEMES: &[(&str, &[&str])] = &[
    ("long wait", &["wait", "waiting", "late", "delay", "overbooked"]),
    (
        "billing issues",
        &["billing", "charges", "overcharged", "invoice", "insurance problem"],
    ),
    (
        "front desk experience",
        &["front desk", "reception", "rude", "unhelpful"],
    ),
    ("pain/discomfort", &["painful", "hurt", "rough", "uncomfortable"]),
    ("upselling", &["upsell", "salesy", "sold me", "pushy"]),
];

const TOP_THEMES: usize = 3;
const NONE_DETECTED: &str = "None detected";

/// Sentiment summary plus top themes per polarity, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInsights {
    pub sentiment: String,
    pub positive_themes: String,
    pub negative_themes: String,
}

impl ReviewInsights {
    #[must_use]
    pub fn sentiment_metric(insights: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(insights, |i| MetricValue::Label(i.sentiment.clone()))
    }

    #[must_use]
    pub fn positive_metric(insights: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(insights, |i| {
            MetricValue::Label(i.positive_themes.clone())
        })
    }

    #[must_use]
    pub fn negative_metric(insights: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(insights, |i| {
            MetricValue::Label(i.negative_themes.clone())
        })
    }
}

/// Strategy for turning review texts into insights.
pub trait ThemeAnalyzer {
    /// Analyze a non-empty review list. `None` means this analyzer failed.
    fn analyze(&self, reviews: &[PlaceReview]) -> Option<ReviewInsights>;

    /// Analyzer name for logging
    fn name(&self) -> &'static str;
}

impl<P: ThemeAnalyzer, F: ThemeAnalyzer> ThemeAnalyzer for FirstSuccess<P, F> {
    fn analyze(&self, reviews: &[PlaceReview]) -> Option<ReviewInsights> {
        self.primary.analyze(reviews).or_else(|| {
            tracing::debug!(
                "{} produced no insights, falling back to {}",
                self.primary.name(),
                self.fallback.name()
            );
            self.fallback.analyze(reviews)
        })
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}

/// Run an analyzer, treating an empty review list as "source unavailable".
pub fn analyze_reviews(
    analyzer: &dyn ThemeAnalyzer,
    reviews: &[PlaceReview],
) -> Option<ReviewInsights> {
    if reviews.is_empty() {
        return None;
    }
    analyzer.analyze(reviews)
}

/// Counts fixed keyword lists per theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordThemeAnalyzer;

impl KeywordThemeAnalyzer {
    /// Themes with at least one hit, most frequent first. Ties keep list order.
    fn count_hits(text: &str, themes: &[(&'static str, &[&str])]) -> Vec<(&'static str, usize)> {
        let mut hits: Vec<(&'static str, usize)> = themes
            .iter()
            .map(|(theme, keywords)| {
                let count = keywords.iter().map(|kw| text.matches(kw).count()).sum();
                (*theme, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        hits
    }

    fn top_themes(hits: &[(&str, usize)]) -> String {
        if hits.is_empty() {
            return NONE_DETECTED.to_string();
        }
        hits.iter()
            .take(TOP_THEMES)
            .map(|(theme, count)| format!("{theme} ({count})"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl ThemeAnalyzer for KeywordThemeAnalyzer {
    fn analyze(&self, reviews: &[PlaceReview]) -> Option<ReviewInsights> {
        let text = reviews
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let positive = Self::count_hits(&text, POSITIVE_THEMES);
        let negative = Self::count_hits(&text, NEGATIVE_THEMES);
        let pos_total: usize = positive.iter().map(|(_, c)| c).sum();
        let neg_total: usize = negative.iter().map(|(_, c)| c).sum();

        let sentiment = if pos_total == 0 && neg_total == 0 {
            "Mixed/neutral (few obvious themes)".to_string()
        } else if pos_total >= neg_total {
            format!("Mostly positive mentions ({pos_total} vs {neg_total})")
        } else {
            format!("Mixed with notable concerns ({neg_total} negatives vs {pos_total} positives)")
        };

        Some(ReviewInsights {
            sentiment,
            positive_themes: Self::top_themes(&positive),
            negative_themes: Self::top_themes(&negative),
        })
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

/// Asks a language model for sentiment and themes as JSON.
pub struct LlmThemeAnalyzer<'a> {
    client: &'a dyn TextAnalysis,
    max_reviews: usize,
}

#[derive(Debug, Deserialize)]
struct LlmThemes {
    sentiment: String,
    positive_themes: String,
    negative_themes: String,
}

impl<'a> LlmThemeAnalyzer<'a> {
    pub fn new(client: &'a dyn TextAnalysis, max_reviews: usize) -> Self {
        Self {
            client,
            max_reviews: max_reviews.max(1),
        }
    }

    fn prompt(&self, reviews: &[PlaceReview]) -> String {
        let mut prompt = String::from(
            "You are analyzing Google reviews for a dental practice.\n\
             Identify the overall sentiment, the top 3 positive themes and the top 3 \
             negative concerns (staff friendliness, professionalism, pain management, \
             comfort, cleanliness, wait times, scheduling, communication, billing, \
             insurance, office environment, treatment quality).\n\
             Respond with only a JSON object with string keys \"sentiment\", \
             \"positive_themes\" (comma-separated) and \"negative_themes\" \
             (comma-separated, or \"None detected\").\n\nReviews:\n",
        );
        for (i, review) in reviews.iter().take(self.max_reviews).enumerate() {
            let stars = review.rating.map_or_else(|| "?".to_string(), |r| format!("{r}"));
            let author = review.author_name.as_deref().unwrap_or("Anonymous");
            let _ = writeln!(
                prompt,
                "Review {} ({stars} star by {author}): {}",
                i + 1,
                review.text.trim()
            );
        }
        prompt
    }

    /// Extract the JSON object from a completion that may carry extra prose.
    fn parse(completion: &str) -> Option<ReviewInsights> {
        let start = completion.find('{')?;
        let end = completion.rfind('}')?;
        if end <= start {
            return None;
        }
        let themes: LlmThemes = serde_json::from_str(&completion[start..=end]).ok()?;
        let sentiment = themes.sentiment.trim();
        if sentiment.is_empty() {
            return None;
        }
        let or_none = |s: &str| {
            let s = s.trim();
            if s.is_empty() {
                NONE_DETECTED.to_string()
            } else {
                s.to_string()
            }
        };
        Some(ReviewInsights {
            sentiment: sentiment.to_string(),
            positive_themes: or_none(&themes.positive_themes),
            negative_themes: or_none(&themes.negative_themes),
        })
    }
}

impl ThemeAnalyzer for LlmThemeAnalyzer<'_> {
    fn analyze(&self, reviews: &[PlaceReview]) -> Option<ReviewInsights> {
        let completion = self.client.complete(&self.prompt(reviews))?;
        let insights = Self::parse(&completion);
        if insights.is_none() {
            tracing::warn!("Discarding unparseable theme analysis response");
        }
        insights
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
