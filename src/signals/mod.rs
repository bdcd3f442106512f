//! Signal extraction.
//!
//! Pure functions over already-fetched data. Each signal is either a typed
//! observation or `None` when its source was unavailable; extractors never
//! fail and never perform I/O.

mod experience;
pub mod listing;
pub mod prefill;
mod reviews;
mod search;
mod sections;
mod website;

pub use experience::{BookingMethod, InsuranceClarity};
pub use listing::{GbpCompleteness, OfficeHours};
pub use reviews::{
    KeywordThemeAnalyzer, LlmThemeAnalyzer, ReviewInsights, ThemeAnalyzer, analyze_reviews,
};
pub use search::{SearchVisibility, search_query};
pub use sections::{AuditSignals, SourceData};
pub use website::{
    AdTag, AdvertisingScripts, MediaCount, SocialPlatform, SocialPresence, WebsiteHealth,
};
