//! The audit run: fetch, extract, score and advise.

use super::budget::{DEFAULT_TIME_BUDGET, Deadline};
use super::stats::{AuditStats, SkippedStage};
use crate::advisory::{AdviceGenerator, Advisor, LlmAdvisor};
use crate::model::url::normalize_url;
use crate::model::{
    AuditRequest, MetricValue, PlaceDetails, PlaceReview, Section, SectionKind,
    maps_link_for_place,
};
use crate::scoring::{ScoreInputs, ScoringWeights, SmileScore, SmileScorer};
use crate::signals::prefill::Prefill;
use crate::signals::{
    AuditSignals, KeywordThemeAnalyzer, LlmThemeAnalyzer, ReviewInsights, SourceData,
    ThemeAnalyzer, analyze_reviews, search_query,
};
use crate::sources::{AnalysisCache, CacheKey, Sources};
use crate::strategy::FirstSuccess;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Reviews sent to the LLM for theme analysis.
pub const DEFAULT_MAX_REVIEWS: usize = 10;

/// Knobs for one audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub time_budget: Duration,
    /// Ask the LLM for review themes, keyword counts as fallback
    pub ai_themes: bool,
    /// Ask the LLM for recommendations, rules as fallback
    pub ai_advice: bool,
    pub max_reviews: usize,
    pub weights: ScoringWeights,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            ai_themes: true,
            ai_advice: true,
            max_reviews: DEFAULT_MAX_REVIEWS,
            weights: ScoringWeights::STANDARD,
        }
    }
}

/// One report section with the advice for each of its metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SectionResult {
    pub section: Section,
    /// Recommendation per metric, in section order; empty means none
    pub advice: IndexMap<String, String>,
}

impl SectionResult {
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.section.kind
    }

    /// Metric rows as (name, value, advice).
    pub fn rows(&self) -> impl Iterator<Item = (&str, &MetricValue, &str)> {
        self.section.iter().map(|(name, value)| {
            let advice = self.advice.get(name).map_or("", String::as_str);
            (name, value, advice)
        })
    }
}

/// Everything an audit produced.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub request: AuditRequest,
    pub generated_at: DateTime<Utc>,
    /// Listing link, from the form or the matched place
    pub maps_link: Option<String>,
    pub sections: Vec<SectionResult>,
    pub score: SmileScore,
    pub score_inputs: ScoreInputs,
    pub weights: ScoringWeights,
    pub reviews: Vec<PlaceReview>,
    pub stats: AuditStats,
}

impl AuditResult {
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&SectionResult> {
        self.sections.iter().find(|s| s.kind() == kind)
    }

    /// Look up a metric in any section.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.sections.iter().find_map(|s| s.section.get(name))
    }

    #[must_use]
    pub fn advice_for(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find_map(|s| s.advice.get(name))
            .map(String::as_str)
    }
}

/// Caches what the wrapped analyzer produces. Wraps only the LLM analyzer,
/// so keyword results never shadow a later LLM analysis.
struct CacheOnSuccess<'c, A> {
    inner: A,
    cache: RefCell<&'c mut AnalysisCache>,
    key: CacheKey,
}

impl<A: ThemeAnalyzer> ThemeAnalyzer for CacheOnSuccess<'_, A> {
    fn analyze(&self, reviews: &[PlaceReview]) -> Option<ReviewInsights> {
        let insights = self.inner.analyze(reviews)?;
        self.cache.borrow_mut().put(self.key.clone(), insights.clone());
        Some(insights)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Stops asking the wrapped generator once the deadline passes, so the
/// rule fallback answers for the remaining metrics.
struct WithinDeadline<'d, G> {
    inner: G,
    deadline: &'d Deadline,
    tripped: &'d Cell<bool>,
}

impl<G: AdviceGenerator> AdviceGenerator for WithinDeadline<'_, G> {
    fn generate(&self, metric: &str, value: &MetricValue) -> Option<String> {
        if self.deadline.exceeded() {
            self.tripped.set(true);
            return None;
        }
        self.inner.generate(metric, value)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Runs audits against a set of sources.
pub struct Auditor {
    sources: Sources,
    options: AuditOptions,
}

impl Auditor {
    #[must_use]
    pub fn new(sources: Sources, options: AuditOptions) -> Self {
        Self { sources, options }
    }

    #[must_use]
    pub const fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Run a full audit. Never fails: unavailable sources degrade their
    /// signals and the run always yields a result.
    pub fn run(&self, request: &AuditRequest, cache: &mut AnalysisCache) -> AuditResult {
        let deadline = Deadline::start(self.options.time_budget);
        let mut stats = AuditStats::new();
        tracing::info!("Auditing {} ({})", request.practice_name(), request.website());

        let (data, place_id) = self.gather(request, &mut stats);
        let reviews = data
            .details
            .as_ref()
            .map(|d| d.reviews.clone())
            .unwrap_or_default();

        let insights = self.review_insights(request, &data, &reviews, cache, &deadline, &mut stats);

        let signals = AuditSignals::extract(request, &data, insights);
        let score_inputs = signals.score_inputs();
        let score = SmileScorer::new(self.options.weights).score(&score_inputs);
        tracing::info!("Smile Score {:.1}/100", score.overall);

        let sections = self.advise(request, signals.sections(), &deadline, &mut stats);
        stats.degraded_signals = sections
            .iter()
            .map(|s| s.section.sentinel_metrics().count())
            .sum();
        stats.duration = deadline.elapsed();
        stats.log_summary();

        let maps_link = request
            .maps_link()
            .map(str::to_string)
            .or_else(|| place_id.as_deref().map(maps_link_for_place));

        AuditResult {
            request: request.clone(),
            generated_at: Utc::now(),
            maps_link,
            sections,
            score,
            score_inputs,
            weights: self.options.weights,
            reviews,
            stats,
        }
    }

    /// Fetch page, listing and search results.
    fn gather(&self, request: &AuditRequest, stats: &mut AuditStats) -> (SourceData, Option<String>) {
        tracing::debug!("Fetching website via {}", self.sources.pages.name());
        let page = self.sources.pages.fetch(request.website());
        stats.api_calls += 1;
        if !page.is_loaded() {
            tracing::warn!("Website {} could not be loaded", request.website());
        }

        let (place_id, details) = self.lookup_listing(
            request.practice_name(),
            request.address(),
            request.website(),
            stats,
        );

        let search_hits = if self.sources.search.is_available() {
            let query = search_query(request);
            tracing::debug!("Searching {:?} via {}", query, self.sources.search.name());
            stats.api_calls += 1;
            self.sources.search.search(&query)
        } else {
            None
        };

        (
            SourceData {
                page,
                details,
                search_hits,
            },
            place_id,
        )
    }

    fn lookup_listing(
        &self,
        name: &str,
        address: &str,
        website: &str,
        stats: &mut AuditStats,
    ) -> (Option<String>, Option<PlaceDetails>) {
        let places = &self.sources.places;
        if !places.is_available() {
            return (None, None);
        }
        stats.api_calls += 1;
        let Some(place_id) = places.find_place_id(name, address, website) else {
            tracing::warn!("No listing found for {:?}", name);
            return (None, None);
        };
        stats.api_calls += 1;
        let details = places.details(&place_id);
        if details.is_none() {
            tracing::warn!("Listing details unavailable for {}", place_id);
        }
        (Some(place_id), details)
    }

    fn review_insights(
        &self,
        request: &AuditRequest,
        data: &SourceData,
        reviews: &[PlaceReview],
        cache: &mut AnalysisCache,
        deadline: &Deadline,
        stats: &mut AuditStats,
    ) -> Option<ReviewInsights> {
        if reviews.is_empty() {
            return None;
        }
        let analysis = &*self.sources.analysis;
        if !(self.options.ai_themes && analysis.is_available()) {
            return analyze_reviews(&KeywordThemeAnalyzer, reviews);
        }

        let review_count = data.details.as_ref().and_then(|d| d.user_ratings_total);
        let key = CacheKey::new(request.website(), request.practice_name(), review_count);
        if let Some(hit) = cache.get(&key) {
            tracing::debug!("Review analysis served from cache");
            stats.cache_hits += 1;
            return Some(hit);
        }

        if deadline.exceeded() {
            stats.skip(SkippedStage::ThemeAnalysis);
            return analyze_reviews(&KeywordThemeAnalyzer, reviews);
        }

        stats.api_calls += 1;
        let chain = FirstSuccess::new(
            CacheOnSuccess {
                inner: LlmThemeAnalyzer::new(analysis, self.options.max_reviews),
                cache: RefCell::new(cache),
                key,
            },
            KeywordThemeAnalyzer,
        );
        analyze_reviews(&chain, reviews)
    }

    fn advise(
        &self,
        request: &AuditRequest,
        sections: Vec<Section>,
        deadline: &Deadline,
        stats: &mut AuditStats,
    ) -> Vec<SectionResult> {
        let analysis = &*self.sources.analysis;
        let tripped = Cell::new(false);
        let advisor = if self.options.ai_advice && analysis.is_available() {
            if deadline.exceeded() {
                stats.skip(SkippedStage::LlmAdvice);
                Advisor::rule_based()
            } else {
                Advisor::with_primary(WithinDeadline {
                    inner: LlmAdvisor::new(analysis, request.practice_name()),
                    deadline,
                    tripped: &tripped,
                })
            }
        } else {
            Advisor::rule_based()
        };
        tracing::debug!("Advice from {}", advisor.name());

        let results = sections
            .into_iter()
            .map(|section| SectionResult {
                advice: advisor.advise_section(&section),
                section,
            })
            .collect();
        if tripped.get() {
            stats.skip(SkippedStage::LlmAdvice);
        }
        results
    }

    /// Suggest form values from the website, topping up from the listing
    /// when the page leaves gaps.
    pub fn prefill(&self, website: &str) -> Prefill {
        let url = normalize_url(website);
        let page = self.sources.pages.fetch(&url);
        let mut prefill = page
            .document()
            .map(Prefill::from_page)
            .unwrap_or_default();

        if prefill.is_incomplete() || prefill.maps_link.is_none() {
            let mut stats = AuditStats::new();
            let (place_id, details) = self.lookup_listing(
                prefill.practice_name.as_deref().unwrap_or_default(),
                prefill.address.as_deref().unwrap_or_default(),
                &url,
                &mut stats,
            );
            if let Some(details) = details {
                prefill.practice_name = prefill.practice_name.or(details.name);
                prefill.address = prefill.address.or(details.formatted_address);
            }
            if prefill.maps_link.is_none() {
                prefill.maps_link = place_id.as_deref().map(maps_link_for_place);
            }
        }
        prefill
    }
}
