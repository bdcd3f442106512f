//! Signals read from the practice website.

use crate::model::url::{host_matches, is_https, resolve_href, site_domain};
use crate::model::{MetricValue, PageDocument, Sentinel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

/// Points for each website health check.
const HTTPS_POINTS: u32 = 34;
const VIEWPORT_POINTS: u32 = 33;
const FAST_LOAD_POINTS: u32 = 33;
const MODERATE_LOAD_POINTS: u32 = 16;

const FAST_LOAD: Duration = Duration::from_secs(2);
const SLOW_LOAD: Duration = Duration::from_secs(5);

/// HTTPS, mobile viewport and load speed, scored out of 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebsiteHealth {
    pub score: u32,
    pub checks: Vec<String>,
}

impl WebsiteHealth {
    /// Score the site. `None` when there is no URL to inspect.
    ///
    /// A URL whose page could not be fetched still scores the scheme check;
    /// the viewport check fails and load speed is unknown.
    ///
    /// Without a URL the two report cells differ on purpose: the score shows
    /// `Search limited` ([`score_metric`](Self::score_metric)) while the
    /// checks show `No URL` ([`checks_metric`](Self::checks_metric)).
    #[must_use]
    pub fn assess(url: &str, page: Option<&PageDocument>, load_time: Option<Duration>) -> Option<Self> {
        if url.trim().is_empty() {
            return None;
        }
        let mut score = 0;
        let mut checks = Vec::with_capacity(3);

        if is_https(url) {
            score += HTTPS_POINTS;
            checks.push("HTTPS ✅".to_string());
        } else {
            checks.push("HTTPS ❌".to_string());
        }

        if page.is_some_and(PageDocument::has_viewport_meta) {
            score += VIEWPORT_POINTS;
            checks.push("Mobile-friendly ✅".to_string());
        } else {
            checks.push("Mobile-friendly ❌".to_string());
        }

        match load_time {
            Some(t) if t < FAST_LOAD => {
                score += FAST_LOAD_POINTS;
                checks.push(format!("Load speed ✅ ({:.2}s)", t.as_secs_f64()));
            }
            Some(t) if t < SLOW_LOAD => {
                score += MODERATE_LOAD_POINTS;
                checks.push(format!("Load speed ⚠️ ({:.2}s)", t.as_secs_f64()));
            }
            Some(t) => checks.push(format!("Load speed ❌ ({:.2}s)", t.as_secs_f64())),
            None => checks.push("Load speed ❓".to_string()),
        }

        Some(Self {
            score: score.min(100),
            checks,
        })
    }

    #[must_use]
    pub fn score_metric(health: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(health, |h| MetricValue::Percentage(h.score))
    }

    #[must_use]
    pub fn checks_metric(health: Option<&Self>) -> MetricValue {
        health.map_or(Sentinel::NoUrl.into(), |h| {
            MetricValue::Label(h.checks.join(" | "))
        })
    }
}

/// Social platforms looked for on the website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Yelp,
}

impl SocialPlatform {
    pub const ALL: [Self; 4] = [Self::Facebook, Self::Instagram, Self::Twitter, Self::Yelp];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Yelp => "Yelp",
        }
    }

    /// Domains that identify a link to this platform
    #[must_use]
    pub const fn domains(&self) -> &'static [&'static str] {
        match self {
            Self::Facebook => &["facebook.com", "fb.com"],
            Self::Instagram => &["instagram.com"],
            Self::Twitter => &["twitter.com", "x.com"],
            Self::Yelp => &["yelp.com"],
        }
    }

    /// Keyword used by icon classes (`fa-facebook`, `icon-yelp`, ...)
    #[must_use]
    pub const fn class_keyword(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Yelp => "yelp",
        }
    }

    fn matches_host(&self, host: &str) -> bool {
        self.domains().iter().any(|d| host_matches(host, d))
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static TEXT_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^@\w.])(?:www\.)?(facebook|fb|instagram|twitter|x|yelp)\.com\b")
        .expect("static regex")
});

/// The set of social platforms the website links to or mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialPresence {
    pub platforms: BTreeSet<SocialPlatform>,
}

impl SocialPresence {
    /// Scan anchor hrefs, visible text and class attributes.
    #[must_use]
    pub fn detect(page: &PageDocument) -> Self {
        let mut platforms = BTreeSet::new();

        for href in page.hrefs() {
            if let Some(host) = resolve_href(page.url(), href).as_ref().and_then(site_domain) {
                platforms.extend(SocialPlatform::ALL.into_iter().filter(|p| p.matches_host(&host)));
            }
        }

        for cap in TEXT_DOMAIN_RE.captures_iter(page.text()) {
            if let Some(m) = cap.get(1) {
                let host = format!("{}.com", m.as_str().to_ascii_lowercase());
                platforms.extend(SocialPlatform::ALL.into_iter().filter(|p| p.matches_host(&host)));
            }
        }

        for class in page.class_attributes() {
            let class = class.to_ascii_lowercase();
            platforms.extend(
                SocialPlatform::ALL
                    .into_iter()
                    .filter(|p| class.contains(p.class_keyword())),
            );
        }

        Self { platforms }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.platforms.len()
    }

    #[must_use]
    pub fn to_metric(presence: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(presence, |p| {
            if p.platforms.is_empty() {
                MetricValue::label("None")
            } else {
                MetricValue::Label(
                    p.platforms
                        .iter()
                        .map(SocialPlatform::name)
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            }
        })
    }
}

/// Image and video tags on the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediaCount {
    pub photos: usize,
    pub videos: usize,
}

impl MediaCount {
    #[must_use]
    pub fn count(page: &PageDocument) -> Self {
        Self {
            photos: page.count_tags("img"),
            videos: page.count_tags("video") + page.count_tags("source"),
        }
    }

    #[must_use]
    pub fn to_metric(media: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(media, |m| {
            MetricValue::Label(format!("{} photos, {} videos", m.photos, m.videos))
        })
    }
}

/// Tracking or advertising tags found in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdTag {
    GoogleTag,
    FacebookPixel,
}

impl AdTag {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GoogleTag => "Google tag",
            Self::FacebookPixel => "Facebook Pixel",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdvertisingScripts {
    pub tags: Vec<AdTag>,
}

impl AdvertisingScripts {
    #[must_use]
    pub fn detect(page: &PageDocument) -> Self {
        let html = page.html();
        let mut tags = Vec::new();
        if html.contains("gtag(") || html.contains("gtag.js") || html.contains("googletagmanager.com") {
            tags.push(AdTag::GoogleTag);
        }
        if html.contains("fbq(") {
            tags.push(AdTag::FacebookPixel);
        }
        Self { tags }
    }

    #[must_use]
    pub fn to_metric(scripts: Option<&Self>) -> MetricValue {
        MetricValue::or_search_limited(scripts, |s| {
            if s.tags.is_empty() {
                MetricValue::label("None detected")
            } else {
                MetricValue::Label(
                    s.tags
                        .iter()
                        .map(AdTag::name)
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDocument {
        PageDocument::parse("https://brightsmiles.com", html)
    }

    const VIEWPORT: &str = r#"<meta name="viewport" content="width=device-width">"#;

    #[test]
    fn test_full_health_is_100() {
        let doc = page(VIEWPORT);
        let health =
            WebsiteHealth::assess("https://a.com", Some(&doc), Some(Duration::from_secs(1))).unwrap();
        assert_eq!(health.score, 100);
        assert_eq!(
            health.checks.join(" | "),
            "HTTPS ✅ | Mobile-friendly ✅ | Load speed ✅ (1.00s)"
        );
        assert_eq!(
            WebsiteHealth::score_metric(Some(&health)).to_string(),
            "100/100"
        );
    }

    #[test]
    fn test_worst_health_is_0() {
        let doc = page("<html></html>");
        let health =
            WebsiteHealth::assess("http://a.com", Some(&doc), Some(Duration::from_secs(6))).unwrap();
        assert_eq!(health.score, 0);
        assert!(health.checks[2].starts_with("Load speed ❌"));
    }

    #[test]
    fn test_moderate_load_and_unknown_speed() {
        let doc = page(VIEWPORT);
        let moderate =
            WebsiteHealth::assess("https://a.com", Some(&doc), Some(Duration::from_secs(3))).unwrap();
        assert_eq!(moderate.score, 34 + 33 + 16);

        let unfetched = WebsiteHealth::assess("https://a.com", None, None).unwrap();
        assert_eq!(unfetched.score, 34);
        assert_eq!(unfetched.checks[2], "Load speed ❓");
    }

    #[test]
    fn test_no_url_sentinels() {
        assert!(WebsiteHealth::assess("", None, None).is_none());
        assert_eq!(WebsiteHealth::score_metric(None), MetricValue::SEARCH_LIMITED);
        assert_eq!(
            WebsiteHealth::checks_metric(None),
            MetricValue::Sentinel(Sentinel::NoUrl)
        );
    }

    #[test]
    fn test_social_detection_sources() {
        let doc = page(
            r#"<a href="https://www.facebook.com/bright">fb</a>
               <a href="https://x.com/bright">x</a>
               <i class="icon icon-yelp"></i>
               <p>Follow us at instagram.com/bright</p>
               <a href="https://linux.com/">not social</a>"#,
        );
        let presence = SocialPresence::detect(&doc);
        assert_eq!(presence.count(), 4);
        assert_eq!(
            SocialPresence::to_metric(Some(&presence)).to_string(),
            "Facebook, Instagram, Twitter, Yelp"
        );
    }

    #[test]
    fn test_mail_and_phone_links_are_not_platforms() {
        let doc = page(
            r#"<a href="mailto:reviews@yelp.com">Email our reviews desk</a>
               <a href="tel:+15550102030">Call</a>
               <p>Write to social@facebook.com</p>"#,
        );
        assert_eq!(SocialPresence::detect(&doc).count(), 0);
    }

    #[test]
    fn test_relative_links_resolve_against_page() {
        let doc = page(r#"<a href="//instagram.com/bright">ig</a><a href="/yelp-reviews">ours</a>"#);
        let presence = SocialPresence::detect(&doc);
        assert_eq!(
            presence.platforms.into_iter().collect::<Vec<_>>(),
            vec![SocialPlatform::Instagram]
        );
    }

    #[test]
    fn test_social_none_is_an_observation() {
        let presence = SocialPresence::detect(&page("<p>hello</p>"));
        assert_eq!(presence.count(), 0);
        let metric = SocialPresence::to_metric(Some(&presence));
        assert_eq!(metric, MetricValue::label("None"));
        assert!(!metric.is_sentinel());
        assert!(SocialPresence::to_metric(None).is_sentinel());
    }

    #[test]
    fn test_media_and_ads() {
        let doc = page(
            r#"<img src="a.jpg"><img src="b.jpg"><video><source src="v.mp4"></video>
               <script async src="https://www.googletagmanager.com/gtag/js?id=G-1"></script>"#,
        );
        assert_eq!(
            MediaCount::to_metric(Some(&MediaCount::count(&doc))).to_string(),
            "2 photos, 2 videos"
        );
        assert_eq!(
            AdvertisingScripts::to_metric(Some(&AdvertisingScripts::detect(&doc))).to_string(),
            "Google tag"
        );
        let plain = AdvertisingScripts::detect(&page("<p>hi</p>"));
        assert_eq!(
            AdvertisingScripts::to_metric(Some(&plain)).to_string(),
            "None detected"
        );
    }
}
