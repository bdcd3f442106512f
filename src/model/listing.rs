//! Business listing and search result records.
//!
//! Field names follow the Google Places "details" payload so the HTTP
//! client can deserialize straight into these types.

use serde::{Deserialize, Serialize};

/// Listing details for one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

impl PlaceDetails {
    /// Whether the listing is categorized as a dental practice
    #[must_use]
    pub fn is_dental(&self) -> bool {
        self.types
            .iter()
            .any(|t| t == "dentist" || t == "dental_clinic")
    }

    /// Weekday opening hours lines, empty when none are listed
    #[must_use]
    pub fn weekday_hours(&self) -> &[String] {
        self.opening_hours
            .as_ref()
            .map_or(&[], |h| h.weekday_text.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

/// A single listing review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// One organic web search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

/// The Google Maps link for a place id.
#[must_use]
pub fn maps_link_for_place(place_id: &str) -> String {
    format!("https://www.google.com/maps/search/?api=1&query=place_id:{place_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_deserialize_sparse_payload() {
        let json = r#"{
            "name": "Bright Smiles Dental",
            "rating": 4.7,
            "user_ratings_total": 212,
            "types": ["dentist", "health", "point_of_interest"],
            "opening_hours": {"weekday_text": ["Monday: 8:00 AM – 5:00 PM"]},
            "photos": [{"photo_reference": "abc", "width": 400}],
            "reviews": [{"author_name": "Pat", "rating": 5, "text": "Friendly staff"}]
        }"#;
        let details: PlaceDetails = serde_json::from_str(json).unwrap();
        assert!(details.is_dental());
        assert_eq!(details.photos.len(), 1);
        assert_eq!(details.weekday_hours().len(), 1);
        assert_eq!(details.reviews[0].rating, Some(5.0));
        assert_eq!(details.website, None);
    }

    #[test]
    fn test_maps_link() {
        assert_eq!(
            maps_link_for_place("ChIJ123"),
            "https://www.google.com/maps/search/?api=1&query=place_id:ChIJ123"
        );
    }
}
