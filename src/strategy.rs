//! Composition of interchangeable strategies.

/// Try `primary`, fall back to `fallback` when it produces nothing.
///
/// Implemented for each strategy trait next to the trait itself
/// ([`ThemeAnalyzer`](crate::signals::ThemeAnalyzer),
/// [`AdviceGenerator`](crate::advisory::AdviceGenerator)).
#[derive(Debug, Clone)]
pub struct FirstSuccess<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P, F> FirstSuccess<P, F> {
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}
