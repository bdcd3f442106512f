//! End-to-end audit runs against in-memory sources.

use smile_audit::model::{
    AuditRequest, ContactForm, FetchedPage, MetricValue, PageDocument, PlaceDetails, PlaceReview,
    SearchHit, SectionKind, maps_link_for_place, names,
};
use smile_audit::pipeline::{AuditOptions, Auditor, SkippedStage};
use smile_audit::sources::{AnalysisCache, PageFetcher, PlaceLookup, Sources, TextAnalysis, WebSearch};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const PRACTICE_HTML: &str = include_str!("fixtures/practice.html");

// ============================================================================
// Fake sources
// ============================================================================

struct FixtureSite;

impl PageFetcher for FixtureSite {
    fn fetch(&self, url: &str) -> FetchedPage {
        FetchedPage::loaded(PageDocument::parse(url, PRACTICE_HTML), Duration::from_millis(400))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

struct FixturePlace;

impl FixturePlace {
    fn details() -> PlaceDetails {
        let review = |rating: f64, text: &str| PlaceReview {
            author_name: Some("Patient".to_string()),
            rating: Some(rating),
            relative_time_description: Some("a month ago".to_string()),
            text: text.to_string(),
        };
        PlaceDetails {
            place_id: Some("place-123".to_string()),
            name: Some("Bright Smiles Dental".to_string()),
            formatted_address: Some("12 Main Street, Springfield, IL 62701".to_string()),
            international_phone_number: Some("+1 555-010-2030".to_string()),
            website: Some("https://brightsmiles.example/".to_string()),
            rating: Some(4.7),
            user_ratings_total: Some(212),
            types: vec!["dentist".to_string(), "health".to_string()],
            reviews: vec![
                review(5.0, "Friendly staff and a very clean office."),
                review(5.0, "Gentle cleaning, the hygienist was great."),
                review(2.0, "Long wait and billing was confusing."),
            ],
            ..PlaceDetails::default()
        }
    }
}

impl PlaceLookup for FixturePlace {
    fn find_place_id(&self, _name: &str, _address: &str, _website: &str) -> Option<String> {
        Some("place-123".to_string())
    }

    fn details(&self, _place_id: &str) -> Option<PlaceDetails> {
        Some(Self::details())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

struct FirstPage;

impl WebSearch for FirstPage {
    fn search(&self, _query: &str) -> Option<Vec<SearchHit>> {
        Some(vec![SearchHit {
            title: "Bright Smiles Dental - Springfield".to_string(),
            snippet: "Family dentist".to_string(),
            link: "https://brightsmiles.example/".to_string(),
        }])
    }

    fn name(&self) -> &'static str {
        "first-page"
    }
}

/// Language model fake that counts theme and advice prompts separately.
#[derive(Clone, Default)]
struct ScriptedLlm {
    theme_calls: Rc<Cell<usize>>,
    advice_calls: Rc<Cell<usize>>,
    themes_down: Rc<Cell<bool>>,
}

impl TextAnalysis for ScriptedLlm {
    fn complete(&self, prompt: &str) -> Option<String> {
        if prompt.contains("Reviews:") {
            self.theme_calls.set(self.theme_calls.get() + 1);
            if self.themes_down.get() {
                return None;
            }
            Some(
                r#"Sure: {"sentiment": "Warm and positive", "positive_themes": "staff, cleanliness", "negative_themes": "wait times"}"#
                    .to_string(),
            )
        } else {
            self.advice_calls.set(self.advice_calls.get() + 1);
            Some("Ask happy patients for a review after each visit".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn request() -> AuditRequest {
    ContactForm {
        website: "brightsmiles.example".to_string(),
        email: "front@brightsmiles.example".to_string(),
        phone: "(555) 010-2030".to_string(),
        practice_name: "Bright Smiles Dental".to_string(),
        address: "12 Main Street, Springfield, IL".to_string(),
        doctor_name: Some("Dr. Rivera".to_string()),
        maps_link: None,
    }
    .validate()
    .expect("valid form")
}

fn full_sources(llm: &ScriptedLlm) -> Sources {
    Sources::offline()
        .with_pages(FixtureSite)
        .with_places(FixturePlace)
        .with_search(FirstPage)
        .with_analysis(llm.clone())
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_full_audit_uses_every_source() {
    let llm = ScriptedLlm::default();
    let auditor = Auditor::new(full_sources(&llm), AuditOptions::default());
    let result = auditor.run(&request(), &mut AnalysisCache::new(8));

    let kinds: Vec<_> = result.sections.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, SectionKind::ALL.to_vec());

    assert_eq!(result.metric(names::GOOGLE_RATING).and_then(MetricValue::as_f64), Some(4.7));
    assert_eq!(
        result.metric(names::SENTIMENT).map(ToString::to_string).as_deref(),
        Some("Warm and positive")
    );
    assert_eq!(result.maps_link, Some(maps_link_for_place("place-123")));
    assert_eq!(result.reviews.len(), 3);
    assert_eq!(llm.theme_calls.get(), 1);
    assert!(llm.advice_calls.get() > 0);

    assert!(result.score.reputation > 0.0);
    assert!(result.score.experience > 0.0);
    assert!(result.stats.skipped_stages.is_empty());
    assert!(!result.stats.budget_exceeded);
}

#[test]
fn test_llm_advice_is_used_for_actionable_metrics() {
    let llm = ScriptedLlm::default();
    let auditor = Auditor::new(full_sources(&llm), AuditOptions::default());
    let result = auditor.run(&request(), &mut AnalysisCache::new(8));

    assert_eq!(
        result.advice_for(names::TOTAL_REVIEWS),
        Some("Ask happy patients for a review after each visit")
    );
}

#[test]
fn test_exceeded_budget_skips_llm_but_completes() {
    let llm = ScriptedLlm::default();
    let options = AuditOptions {
        time_budget: Duration::ZERO,
        ..AuditOptions::default()
    };
    let auditor = Auditor::new(full_sources(&llm), options);
    let mut cache = AnalysisCache::new(8);
    let result = auditor.run(&request(), &mut cache);

    assert_eq!(llm.theme_calls.get(), 0);
    assert_eq!(llm.advice_calls.get(), 0);
    assert!(result.stats.budget_exceeded);
    assert!(result.stats.skipped_stages.contains(&SkippedStage::ThemeAnalysis));
    assert!(result.stats.skipped_stages.contains(&SkippedStage::LlmAdvice));

    // Keyword themes stand in, and are not cached for later runs
    let sentiment = result.metric(names::SENTIMENT).unwrap().to_string();
    assert!(sentiment.starts_with("Mostly positive"), "{sentiment}");
    assert!(cache.is_empty());

    assert_eq!(result.sections.len(), 4);
    assert!(!result.advice_for(names::TOTAL_REVIEWS).unwrap().is_empty());
}

#[test]
fn test_review_analysis_is_cached_across_runs() {
    let llm = ScriptedLlm::default();
    let auditor = Auditor::new(full_sources(&llm), AuditOptions::default());
    let mut cache = AnalysisCache::new(8);

    let first = auditor.run(&request(), &mut cache);
    let second = auditor.run(&request(), &mut cache);

    assert_eq!(llm.theme_calls.get(), 1);
    assert_eq!(first.stats.cache_hits, 0);
    assert_eq!(second.stats.cache_hits, 1);
    assert_eq!(
        first.metric(names::TOP_POSITIVE),
        second.metric(names::TOP_POSITIVE)
    );
}

#[test]
fn test_keyword_fallback_is_not_cached() {
    let llm = ScriptedLlm::default();
    let auditor = Auditor::new(full_sources(&llm), AuditOptions::default());
    let mut cache = AnalysisCache::new(8);

    llm.themes_down.set(true);
    let degraded = auditor.run(&request(), &mut cache);
    let sentiment = degraded.metric(names::SENTIMENT).unwrap().to_string();
    assert!(sentiment.starts_with("Mostly positive"), "{sentiment}");
    assert!(cache.is_empty());

    llm.themes_down.set(false);
    let recovered = auditor.run(&request(), &mut cache);
    assert_eq!(llm.theme_calls.get(), 2);
    assert_eq!(recovered.stats.cache_hits, 0);
    assert_eq!(
        recovered.metric(names::SENTIMENT).map(ToString::to_string).as_deref(),
        Some("Warm and positive")
    );
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_rules_only_run_leaves_cache_for_llm() {
    let llm = ScriptedLlm::default();
    let mut cache = AnalysisCache::new(8);
    let rules_only = AuditOptions {
        ai_themes: false,
        ai_advice: false,
        ..AuditOptions::default()
    };
    Auditor::new(full_sources(&llm), rules_only).run(&request(), &mut cache);
    assert!(cache.is_empty());

    let result = Auditor::new(full_sources(&llm), AuditOptions::default()).run(&request(), &mut cache);
    assert_eq!(llm.theme_calls.get(), 1);
    assert_eq!(
        result.metric(names::SENTIMENT).map(ToString::to_string).as_deref(),
        Some("Warm and positive")
    );
}

#[test]
fn test_rules_only_makes_no_llm_calls() {
    let llm = ScriptedLlm::default();
    let options = AuditOptions {
        ai_themes: false,
        ai_advice: false,
        ..AuditOptions::default()
    };
    let auditor = Auditor::new(full_sources(&llm), options);
    let result = auditor.run(&request(), &mut AnalysisCache::new(8));

    assert_eq!(llm.theme_calls.get() + llm.advice_calls.get(), 0);
    assert!(result.stats.skipped_stages.is_empty());
    assert!(result.metric(names::TOP_POSITIVE).is_some_and(|v| !v.is_sentinel()));
}

#[test]
fn test_offline_audit_degrades_to_sentinels() {
    let auditor = Auditor::new(Sources::offline(), AuditOptions::default());
    let result = auditor.run(&request(), &mut AnalysisCache::new(8));

    let sentinels: usize = result
        .sections
        .iter()
        .map(|s| s.section.sentinel_metrics().count())
        .sum();
    assert!(sentinels > 0);
    assert_eq!(result.stats.degraded_signals, sentinels);

    for name in [names::GOOGLE_RATING, names::SOCIAL_PRESENCE, names::BOOKING] {
        assert!(result.metric(name).unwrap().is_sentinel(), "{name}");
        assert_eq!(result.advice_for(name), Some(""));
    }
    assert_eq!(result.score.reputation, 0.0);
    assert_eq!(result.score.experience, 0.0);
}

#[test]
fn test_only_website_available() {
    let auditor = Auditor::new(
        Sources::offline().with_pages(FixtureSite),
        AuditOptions::default(),
    );
    let result = auditor.run(&request(), &mut AnalysisCache::new(8));

    assert!(!result.metric(names::SOCIAL_PRESENCE).unwrap().is_sentinel());
    assert!(!result.metric(names::BOOKING).unwrap().is_sentinel());
    assert!(result.metric(names::GOOGLE_RATING).unwrap().is_sentinel());
    assert!(result.score.visibility > 0.0);
    assert_eq!(result.score.reputation, 0.0);
    assert!(result.maps_link.is_none());
}

#[test]
fn test_prefill_from_fixture_site() {
    let auditor = Auditor::new(
        Sources::offline().with_pages(FixtureSite),
        AuditOptions::default(),
    );
    let prefill = auditor.prefill("brightsmiles.example");
    assert_eq!(prefill.practice_name.as_deref(), Some("Bright Smiles Dental"));
    assert!(prefill.address.is_some());
}
