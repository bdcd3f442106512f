//! Score command handler.
//!
//! Offline Smile Score calculator: signals in, score out. No sources are
//! contacted.

use crate::pipeline::exit_codes;
use crate::scoring::{
    SCORING_ENGINE_VERSION, ScoreBucket, ScoreInputs, ScoringWeights, SmileScore, SmileScorer,
};
use crate::signals::BookingMethod;
use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

/// Booking method as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BookingArg {
    /// Embedded scheduling tool
    Online,
    /// Booking link or request form
    Form,
    /// Phone only
    Phone,
}

impl From<BookingArg> for BookingMethod {
    fn from(arg: BookingArg) -> Self {
        match arg {
            BookingArg::Online => Self::OnlineEmbedded,
            BookingArg::Form => Self::OnlineLinkOrForm,
            BookingArg::Phone => Self::PhoneOnly,
        }
    }
}

/// Known signals. Anything left out is treated as unknown.
#[derive(Debug, Clone, Default, Args)]
pub struct ScoreArgs {
    /// Website health, 0-100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub website_health: Option<u32>,

    /// Social platforms linked from the site (0-4)
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=4))]
    pub social: Option<u64>,

    /// Average star rating, 0-5
    #[arg(long)]
    pub rating: Option<f64>,

    /// Total number of reviews
    #[arg(long)]
    pub reviews: Option<u64>,

    /// How patients book
    #[arg(long, value_enum)]
    pub booking: Option<BookingArg>,

    /// Whether office hours are listed
    #[arg(long)]
    pub hours: Option<bool>,

    /// Whether accepted insurance is stated clearly
    #[arg(long)]
    pub insurance: Option<bool>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ScoreArgs {
    /// Score inputs for these arguments.
    #[must_use]
    pub fn to_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            website_health_pct: self.website_health,
            social_platforms: self.social.and_then(|n| usize::try_from(n).ok()),
            rating: self.rating.map(|r| r.clamp(0.0, 5.0)),
            review_count: self.reviews,
            booking: self.booking.map(BookingMethod::from),
            hours_present: self.hours,
            insurance_clear: self.insurance,
            accessibility_present: None,
        }
    }
}

/// Run the score command, printing the result to stdout.
pub fn run_score(args: &ScoreArgs) -> Result<i32> {
    if let Some(rating) = args.rating
        && !(0.0..=5.0).contains(&rating)
    {
        tracing::error!("Invalid rating {}: must be between 0 and 5", rating);
        return Ok(exit_codes::INVALID_INPUT);
    }

    let inputs = args.to_inputs();
    let weights = ScoringWeights::STANDARD;
    let score = SmileScorer::new(weights).score(&inputs);

    let output = if args.json {
        serde_json::to_string_pretty(&json!({
            "scoring_engine_version": SCORING_ENGINE_VERSION,
            "score": score,
            "weights": weights,
            "inputs": inputs,
        }))?
    } else {
        format_table(&score, &weights)
    };
    println!("{output}");
    Ok(exit_codes::SUCCESS)
}

fn format_table(score: &SmileScore, weights: &ScoringWeights) -> String {
    ScoreBucket::ALL
        .iter()
        .map(|&bucket| {
            format!(
                "{:<12} {:>5.1} / {:.0}",
                bucket.label(),
                score.get(bucket),
                SmileScore::max(bucket, weights)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
