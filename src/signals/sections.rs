//! Assembles extractor outputs into report sections and scoring inputs.

use super::{
    AdvertisingScripts, BookingMethod, GbpCompleteness, InsuranceClarity, MediaCount, OfficeHours,
    ReviewInsights, SearchVisibility, SocialPresence, WebsiteHealth, listing,
};
use crate::model::{
    AuditRequest, FetchedPage, MetricValue, PlaceDetails, SearchHit, Section, SectionKind, names,
};
use crate::scoring::ScoreInputs;
use serde::Serialize;

/// Raw data gathered for one audit.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub page: FetchedPage,
    /// `None` when the listing lookup failed or was not configured
    pub details: Option<PlaceDetails>,
    /// `None` when search was unavailable
    pub search_hits: Option<Vec<SearchHit>>,
}

/// Every extracted signal. `None` means the source was unavailable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSignals {
    pub website_health: Option<WebsiteHealth>,
    pub social: Option<SocialPresence>,
    pub gbp: Option<GbpCompleteness>,
    pub search: Option<SearchVisibility>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub insights: Option<ReviewInsights>,
    pub media: Option<MediaCount>,
    pub google_photos: Option<usize>,
    pub advertising: Option<AdvertisingScripts>,
    pub booking: Option<BookingMethod>,
    pub hours: Option<OfficeHours>,
    pub insurance: Option<InsuranceClarity>,
}

impl AuditSignals {
    /// Run every extractor over the gathered data.
    #[must_use]
    pub fn extract(
        request: &AuditRequest,
        data: &SourceData,
        insights: Option<ReviewInsights>,
    ) -> Self {
        let page = data.page.document();
        let details = data.details.as_ref();

        Self {
            website_health: WebsiteHealth::assess(request.website(), page, data.page.elapsed),
            social: page.map(SocialPresence::detect),
            gbp: details.map(GbpCompleteness::assess),
            search: data.search_hits.as_deref().map(|hits| {
                SearchVisibility::classify(hits, request.website(), request.practice_name())
            }),
            rating: listing::rating(details),
            review_count: listing::review_count(details),
            insights,
            media: page.map(MediaCount::count),
            google_photos: listing::photo_count(details),
            advertising: page.map(AdvertisingScripts::detect),
            booking: page.map(BookingMethod::detect),
            hours: details.map(OfficeHours::from_details),
            insurance: page.map(InsuranceClarity::detect),
        }
    }

    #[must_use]
    pub fn visibility(&self) -> Section {
        Section::new(SectionKind::Visibility)
            .with(
                names::GBP_COMPLETENESS,
                GbpCompleteness::score_metric(self.gbp.as_ref()),
            )
            .with(
                names::GBP_SIGNALS,
                GbpCompleteness::checks_metric(self.gbp.as_ref()),
            )
            .with(
                names::SEARCH_VISIBILITY,
                SearchVisibility::to_metric(self.search),
            )
            .with(
                names::WEBSITE_HEALTH_SCORE,
                WebsiteHealth::score_metric(self.website_health.as_ref()),
            )
            .with(
                names::WEBSITE_HEALTH_CHECKS,
                WebsiteHealth::checks_metric(self.website_health.as_ref()),
            )
            .with(
                names::SOCIAL_PRESENCE,
                SocialPresence::to_metric(self.social.as_ref()),
            )
    }

    #[must_use]
    pub fn reputation(&self) -> Section {
        let insights = self.insights.as_ref();
        Section::new(SectionKind::Reputation)
            .with(
                names::GOOGLE_RATING,
                MetricValue::or_search_limited(self.rating, MetricValue::Rating),
            )
            .with(
                names::TOTAL_REVIEWS,
                MetricValue::or_search_limited(self.review_count, |n| {
                    MetricValue::Number(n as f64)
                }),
            )
            .with(names::SENTIMENT, ReviewInsights::sentiment_metric(insights))
            .with(names::TOP_POSITIVE, ReviewInsights::positive_metric(insights))
            .with(names::TOP_NEGATIVE, ReviewInsights::negative_metric(insights))
    }

    #[must_use]
    pub fn marketing(&self) -> Section {
        Section::new(SectionKind::Marketing)
            .with(names::WEBSITE_MEDIA, MediaCount::to_metric(self.media.as_ref()))
            .with(
                names::GOOGLE_PHOTOS,
                MetricValue::or_search_limited(self.google_photos, |n| {
                    MetricValue::Number(n as f64)
                }),
            )
            .with(
                names::ADVERTISING,
                AdvertisingScripts::to_metric(self.advertising.as_ref()),
            )
    }

    #[must_use]
    pub fn experience(&self) -> Section {
        Section::new(SectionKind::Experience)
            .with(names::BOOKING, BookingMethod::to_metric(self.booking))
            .with(names::OFFICE_HOURS, OfficeHours::to_metric(self.hours.as_ref()))
            .with(
                names::INSURANCE,
                InsuranceClarity::to_metric(self.insurance.as_ref()),
            )
    }

    /// The four sections in display order.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        vec![
            self.visibility(),
            self.reputation(),
            self.marketing(),
            self.experience(),
        ]
    }

    /// Scoring inputs derived from the same signals as the sections.
    #[must_use]
    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            website_health_pct: self.website_health.as_ref().map(|h| h.score),
            social_platforms: self.social.as_ref().map(SocialPresence::count),
            rating: self.rating,
            review_count: self.review_count,
            booking: self.booking,
            hours_present: self.hours.as_ref().map(OfficeHours::is_listed),
            insurance_clear: self.insurance.as_ref().map(InsuranceClarity::is_clear),
            accessibility_present: None,
        }
    }
}
