//! Smile Score computation.
//!
//! The score has three weighted parts:
//!
//! - **Visibility** (30): website health and social presence
//! - **Reputation** (40): star rating and review volume
//! - **Experience** (30): booking, office hours, insurance clarity and
//!   accessibility
//!
//! A part whose signals are all unknown scores 0.

mod engine;

pub use engine::{
    SCORING_ENGINE_VERSION, ScoreBucket, ScoreInputs, ScoringWeights, SmileScore, SmileScorer,
    compute_score, round1,
};
