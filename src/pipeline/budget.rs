//! Wall-clock budget for a single audit.

use std::time::{Duration, Instant};

/// Default time an audit may take before optional enrichment is skipped.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(60);

/// A deadline measured from when the audit started.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start the clock now.
    #[must_use]
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left, zero once exceeded
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    #[must_use]
    pub fn exceeded(&self) -> bool {
        self.elapsed() >= self.budget
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::start(DEFAULT_TIME_BUDGET)
    }
}
