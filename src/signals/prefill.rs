//! Form prefill: practice name, address and maps link guessed from the website.

use crate::model::PageDocument;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

const MAPS_LINK_MARKERS: &[&str] = &[
    "google.com/maps",
    "goo.gl/maps",
    "maps.app.goo.gl",
    "g.page/",
];

const POSTAL_ADDRESS_PROPS: &[&str] = &[
    "streetAddress",
    "addressLocality",
    "addressRegion",
    "postalCode",
    "addressCountry",
];

static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,6}\s+[^\n,]+(?:road|rd\.?|street|st\.?|ave|avenue|blvd|lane|ln|dr|drive|hwy|highway|pkwy|parkway|mall|suite|ste|floor|fl|#)[^\n]*",
    )
    .expect("static regex")
});

/// Values suggested for the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Prefill {
    pub practice_name: Option<String>,
    pub address: Option<String>,
    pub maps_link: Option<String>,
}

impl Prefill {
    /// Extract what the page offers.
    #[must_use]
    pub fn from_page(page: &PageDocument) -> Self {
        let (address, maps_link) = address_and_maps_link(page);
        Self {
            practice_name: practice_name(page),
            address,
            maps_link,
        }
    }

    /// Whether a listing lookup could still add something.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.practice_name.is_none() || self.address.is_none()
    }
}

/// First of `<h1>`, `<title>`, `og:site_name`.
#[must_use]
pub fn practice_name(page: &PageDocument) -> Option<String> {
    page.first_h1()
        .or_else(|| page.title())
        .or_else(|| page.meta_content("og:site_name"))
}

/// Address and Google Maps link, from the first source that has them.
///
/// A maps link whose anchor text is a usable address wins outright. A bare
/// maps link is kept while the address is looked up in microdata and then
/// in the visible text.
#[must_use]
pub fn address_and_maps_link(page: &PageDocument) -> (Option<String>, Option<String>) {
    let mut maps_link = None;
    if let Some(anchor) = page
        .anchors()
        .into_iter()
        .find(|a| MAPS_LINK_MARKERS.iter().any(|m| a.href.contains(m)))
    {
        let text = anchor.text.trim();
        let lower = text.to_ascii_lowercase();
        if !text.is_empty() && !lower.starts_with("http://") && !lower.starts_with("https://") {
            return (Some(text.to_string()), Some(anchor.href));
        }
        maps_link = Some(anchor.href);
    }

    if page.has_postal_address() {
        let parts: Vec<String> = POSTAL_ADDRESS_PROPS
            .iter()
            .filter_map(|prop| page.itemprop_text(prop))
            .collect();
        if !parts.is_empty() {
            return (Some(parts.join(", ")), maps_link);
        }
    }

    let street = page
        .text_lines()
        .iter()
        .find_map(|line| STREET_RE.find(line).map(|m| m.as_str().trim().to_string()));
    (street, maps_link)
}
