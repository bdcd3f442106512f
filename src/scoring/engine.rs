//! Smile Score engine.
//!
//! Three weighted sub-scores, each the average of its known partial
//! signals (0-100) scaled by the sub-score weight. Unknown signals are left
//! out of the average; known-negative signals count as 0.

use crate::signals::BookingMethod;
use serde::{Deserialize, Serialize};

/// Scoring engine version, reported alongside results
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Points awarded per social platform, capped at 100
const POINTS_PER_PLATFORM: f64 = 25.0;
/// Review count at which the volume signal saturates
const REVIEW_COUNT_TARGET: f64 = 500.0;

const ONLINE_BOOKING_SIGNAL: f64 = 80.0;
const PHONE_BOOKING_SIGNAL: f64 = 40.0;
const HOURS_SIGNAL: f64 = 70.0;
const INSURANCE_SIGNAL: f64 = 80.0;
const ACCESSIBILITY_SIGNAL: f64 = 70.0;

/// Sub-score maxima. They sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub visibility: f64,
    pub reputation: f64,
    pub experience: f64,
}

impl ScoringWeights {
    pub const STANDARD: Self = Self {
        visibility: 30.0,
        reputation: 40.0,
        experience: 30.0,
    };

    #[must_use]
    pub fn total(&self) -> f64 {
        self.visibility + self.reputation + self.experience
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Inputs to the score. `None` means unknown and excludes the signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Website health, 0-100
    pub website_health_pct: Option<u32>,
    /// Number of social platforms found (0-4)
    pub social_platforms: Option<usize>,
    /// Average star rating, 0-5
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub booking: Option<BookingMethod>,
    pub hours_present: Option<bool>,
    pub insurance_clear: Option<bool>,
    /// No signal source yet; always unknown in audits
    pub accessibility_present: Option<bool>,
}

/// The Smile Score: overall out of 100 plus the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmileScore {
    pub overall: f64,
    pub visibility: f64,
    pub reputation: f64,
    pub experience: f64,
}

/// One of the score chips shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBucket {
    Overall,
    Visibility,
    Reputation,
    Experience,
}

impl ScoreBucket {
    pub const ALL: [Self; 4] = [
        Self::Overall,
        Self::Visibility,
        Self::Reputation,
        Self::Experience,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Overall => "Smile Score",
            Self::Visibility => "Visibility",
            Self::Reputation => "Reputation",
            Self::Experience => "Experience",
        }
    }
}

impl SmileScore {
    #[must_use]
    pub const fn get(&self, bucket: ScoreBucket) -> f64 {
        match bucket {
            ScoreBucket::Overall => self.overall,
            ScoreBucket::Visibility => self.visibility,
            ScoreBucket::Reputation => self.reputation,
            ScoreBucket::Experience => self.experience,
        }
    }

    /// Maximum of a bucket under the given weights
    #[must_use]
    pub fn max(bucket: ScoreBucket, weights: &ScoringWeights) -> f64 {
        match bucket {
            ScoreBucket::Overall => weights.total(),
            ScoreBucket::Visibility => weights.visibility,
            ScoreBucket::Reputation => weights.reputation,
            ScoreBucket::Experience => weights.experience,
        }
    }

    /// Share of the bucket maximum, 0-100
    #[must_use]
    pub fn percent_of_max(&self, bucket: ScoreBucket, weights: &ScoringWeights) -> f64 {
        let max = Self::max(bucket, weights);
        if max <= 0.0 {
            0.0
        } else {
            (self.get(bucket) / max * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Known partial signals of one sub-score.
#[derive(Debug, Default)]
struct Partials(Vec<f64>);

impl Partials {
    /// Record a known signal, clamped to 0-100. Non-finite values are unknown.
    fn push(&mut self, signal: Option<f64>) {
        if let Some(value) = signal.filter(|v| v.is_finite()) {
            self.0.push(value.clamp(0.0, 100.0));
        }
    }

    fn average(&self) -> f64 {
        if self.0.is_empty() {
            0.0
        } else {
            self.0.iter().sum::<f64>() / self.0.len() as f64
        }
    }

    fn weighted(&self, weight: f64) -> f64 {
        round1(self.average() * weight / 100.0)
    }
}

/// Round half away from zero to one decimal place.
#[must_use]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn known_bool(value: Option<bool>, points: f64) -> Option<f64> {
    value.map(|present| if present { points } else { 0.0 })
}

/// Scores inputs with configurable weights.
#[derive(Debug, Clone, Default)]
pub struct SmileScorer {
    weights: ScoringWeights,
}

impl SmileScorer {
    #[must_use]
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    #[must_use]
    pub fn score(&self, inputs: &ScoreInputs) -> SmileScore {
        let mut visibility = Partials::default();
        visibility.push(inputs.website_health_pct.map(f64::from));
        visibility.push(
            inputs
                .social_platforms
                .map(|n| (n as f64 * POINTS_PER_PLATFORM).min(100.0)),
        );

        let mut reputation = Partials::default();
        reputation.push(inputs.rating.map(|r| r / 5.0 * 100.0));
        reputation.push(
            inputs
                .review_count
                .map(|n| (n as f64 / REVIEW_COUNT_TARGET).min(1.0) * 100.0),
        );

        let mut experience = Partials::default();
        experience.push(inputs.booking.map(|b| {
            if b.is_online() {
                ONLINE_BOOKING_SIGNAL
            } else {
                PHONE_BOOKING_SIGNAL
            }
        }));
        experience.push(known_bool(inputs.hours_present, HOURS_SIGNAL));
        experience.push(known_bool(inputs.insurance_clear, INSURANCE_SIGNAL));
        experience.push(known_bool(inputs.accessibility_present, ACCESSIBILITY_SIGNAL));

        let visibility = visibility.weighted(self.weights.visibility);
        let reputation = reputation.weighted(self.weights.reputation);
        let experience = experience.weighted(self.weights.experience);

        SmileScore {
            overall: round1(visibility + reputation + experience),
            visibility,
            reputation,
            experience,
        }
    }
}

/// Score with the standard 30/40/30 weights.
#[must_use]
pub fn compute_score(inputs: &ScoreInputs) -> SmileScore {
    SmileScorer::default().score(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_100() {
        assert!((ScoringWeights::STANDARD.total() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_unknown_is_zero() {
        let score = compute_score(&ScoreInputs::default());
        assert_eq!(score.visibility, 0.0);
        assert_eq!(score.reputation, 0.0);
        assert_eq!(score.experience, 0.0);
        assert_eq!(score.overall, 0.0);
    }

    #[test]
    fn test_three_platforms_is_75_partial() {
        let score = compute_score(&ScoreInputs {
            social_platforms: Some(3),
            ..ScoreInputs::default()
        });
        assert_eq!(score.visibility, 22.5);
    }

    #[test]
    fn test_known_false_participates_unknown_does_not() {
        let with_false = compute_score(&ScoreInputs {
            booking: Some(BookingMethod::OnlineEmbedded),
            hours_present: Some(false),
            ..ScoreInputs::default()
        });
        // (80 + 0) / 2 * 0.30
        assert_eq!(with_false.experience, 12.0);

        let with_unknown = compute_score(&ScoreInputs {
            booking: Some(BookingMethod::OnlineEmbedded),
            ..ScoreInputs::default()
        });
        assert_eq!(with_unknown.experience, 24.0);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let score = compute_score(&ScoreInputs {
            rating: Some(9.0),
            review_count: Some(5_000),
            ..ScoreInputs::default()
        });
        assert_eq!(score.reputation, 40.0);

        let negative = compute_score(&ScoreInputs {
            rating: Some(-2.0),
            ..ScoreInputs::default()
        });
        assert_eq!(negative.reputation, 0.0);

        let nan = compute_score(&ScoreInputs {
            rating: Some(f64::NAN),
            ..ScoreInputs::default()
        });
        assert_eq!(nan.reputation, 0.0);
    }

    #[test]
    fn test_typical_practice() {
        let score = compute_score(&ScoreInputs {
            website_health_pct: Some(80),
            social_platforms: Some(2),
            rating: Some(4.6),
            review_count: Some(212),
            booking: Some(BookingMethod::OnlineLinkOrForm),
            hours_present: Some(true),
            insurance_clear: Some(true),
            accessibility_present: None,
        });
        // (80 + 50) / 2 * 0.3
        assert_eq!(score.visibility, 19.5);
        // (92 + 42.4) / 2 * 0.4 = 26.88
        assert_eq!(score.reputation, 26.9);
        // (80 + 70 + 80) / 3 * 0.3
        assert_eq!(score.experience, 23.0);
        assert_eq!(score.overall, 69.4);
    }

    #[test]
    fn test_percent_of_max() {
        let score = SmileScore {
            overall: 50.0,
            visibility: 15.0,
            reputation: 20.0,
            experience: 15.0,
        };
        let weights = ScoringWeights::STANDARD;
        assert_eq!(score.percent_of_max(ScoreBucket::Visibility, &weights), 50.0);
        assert_eq!(score.percent_of_max(ScoreBucket::Overall, &weights), 50.0);
    }
}
