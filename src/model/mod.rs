//! Core data types for an audit.
//!
//! Values flow one way: a validated [`AuditRequest`] drives the fetch of a
//! [`FetchedPage`], [`PlaceDetails`] and [`SearchHit`]s, which the signal
//! extractors turn into [`Section`]s of [`MetricValue`]s.

mod listing;
mod metric;
mod page;
mod request;
mod section;
pub mod url;

pub use listing::{
    OpeningHours, PlaceDetails, PlacePhoto, PlaceReview, SearchHit, maps_link_for_place,
};
pub use metric::{MetricValue, Sentinel};
pub use page::{Anchor, FetchedPage, PageDocument};
pub use request::{
    AuditRequest, ContactForm, FieldError, FormField, MIN_PHONE_DIGITS, ValidationErrors,
};
pub use section::{Section, SectionKind, names};
