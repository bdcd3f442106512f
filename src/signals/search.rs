//! Local search visibility.

use crate::model::url::domain_of;
use crate::model::{AuditRequest, MetricValue, SearchHit};
use serde::Serialize;

/// Whether the practice shows up on the first results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchVisibility {
    OnPageOne,
    NotOnPageOne,
}

impl SearchVisibility {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OnPageOne => "Yes (Page 1)",
            Self::NotOnPageOne => "No (Not on Page 1)",
        }
    }

    /// Classify the first page of results.
    ///
    /// A hit counts when its domain equals the practice domain (ignoring
    /// `www.`) or the practice name appears in its title or snippet.
    #[must_use]
    pub fn classify(hits: &[SearchHit], website: &str, practice_name: &str) -> Self {
        let domain = domain_of(website);
        let name = practice_name.trim().to_lowercase();
        let found = hits.iter().any(|hit| {
            let domain_match = domain
                .as_deref()
                .is_some_and(|d| domain_of(&hit.link).as_deref() == Some(d));
            let name_match = !name.is_empty()
                && (hit.title.to_lowercase().contains(&name)
                    || hit.snippet.to_lowercase().contains(&name));
            domain_match || name_match
        });
        if found {
            Self::OnPageOne
        } else {
            Self::NotOnPageOne
        }
    }

    #[must_use]
    pub fn to_metric(visibility: Option<Self>) -> MetricValue {
        MetricValue::or_search_limited(visibility, |v| MetricValue::label(v.label()))
    }
}

/// The query a local patient would type.
#[must_use]
pub fn search_query(request: &AuditRequest) -> String {
    match request.city() {
        Some(city) => format!("dentist near {city}"),
        None => format!("dentist near me {}", request.practice_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContactForm;

    fn hit(title: &str, link: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            snippet: String::new(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_domain_match_ignores_www() {
        let hits = vec![
            hit("Top 10 dentists", "https://directory.example/top"),
            hit("Home", "https://www.brightsmiles.com/"),
        ];
        assert_eq!(
            SearchVisibility::classify(&hits, "https://brightsmiles.com", "Other Name"),
            SearchVisibility::OnPageOne
        );
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let hits = vec![hit("BRIGHT SMILES DENTAL - Springfield", "https://yelp.com/x")];
        assert_eq!(
            SearchVisibility::classify(&hits, "https://other.com", "Bright Smiles Dental"),
            SearchVisibility::OnPageOne
        );
    }

    #[test]
    fn test_absent_and_unavailable() {
        let hits = vec![hit("Some other clinic", "https://other.com")];
        let visibility =
            SearchVisibility::classify(&hits, "https://brightsmiles.com", "Bright Smiles");
        assert_eq!(
            SearchVisibility::to_metric(Some(visibility)).to_string(),
            "No (Not on Page 1)"
        );
        assert!(SearchVisibility::to_metric(None).is_sentinel());
    }

    #[test]
    fn test_query_uses_city_then_name() {
        let form = ContactForm {
            website: "a.com".to_string(),
            email: "a@a.com".to_string(),
            phone: "5551234567".to_string(),
            practice_name: "Bright Smiles".to_string(),
            address: "1 Main St, Springfield, IL".to_string(),
            ..ContactForm::default()
        };
        let request = form.clone().validate().unwrap();
        assert_eq!(search_query(&request), "dentist near Springfield");

        let no_city = ContactForm {
            address: "Springfield".to_string(),
            ..form
        }
        .validate()
        .unwrap();
        assert_eq!(search_query(&no_city), "dentist near me Bright Smiles");
    }
}
