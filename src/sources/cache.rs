//! Bounded in-process cache for review analyses.

use crate::signals::ReviewInsights;
use indexmap::IndexMap;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Cache key for a review analysis.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key on the practice identity and how many reviews it had.
    ///
    /// A new review changes the count and therefore the key.
    #[must_use]
    pub fn new(website: &str, practice_name: &str, review_count: Option<u64>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "site:{}|name:{}|reviews:{:?}",
            website.trim().to_lowercase(),
            practice_name.trim().to_lowercase(),
            review_count
        ));
        Self(format!("{:x}", hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
}

/// Strict LRU cache of [`ReviewInsights`].
///
/// Entries are kept in recency order: the front is the least recently used.
#[derive(Debug)]
pub struct AnalysisCache {
    capacity: usize,
    entries: IndexMap<CacheKey, ReviewInsights>,
    stats: CacheStats,
}

impl AnalysisCache {
    /// A cache holding at most `capacity` entries. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up an entry and mark it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<ReviewInsights> {
        match self.entries.shift_remove(key) {
            Some(value) => {
                self.entries.insert(key.clone(), value.clone());
                self.stats.hits += 1;
                Some(value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Check presence without touching recency or counters.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry as most recently used, evicting the least recently
    /// used entries beyond capacity.
    pub fn put(&mut self, key: CacheKey, value: ReviewInsights) {
        if self.capacity == 0 {
            return;
        }
        self.entries.shift_remove(&key);
        self.entries.insert(key, value);
        while self.entries.len() > self.capacity {
            if self.entries.shift_remove_index(0).is_some() {
                self.stats.evictions += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights(tag: &str) -> ReviewInsights {
        ReviewInsights {
            sentiment: tag.to_string(),
            positive_themes: "None detected".to_string(),
            negative_themes: "None detected".to_string(),
        }
    }

    fn key(n: u64) -> CacheKey {
        CacheKey::new("https://a.com", "A Dental", Some(n))
    }

    #[test]
    fn test_key_is_stable_and_count_sensitive() {
        assert_eq!(key(1), key(1));
        assert_ne!(key(1), key(2));
        assert_eq!(
            CacheKey::new("https://A.com ", "a dental", Some(1)),
            key(1)
        );
        assert_eq!(key(1).as_str().len(), 64);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = AnalysisCache::new(2);
        cache.put(key(1), insights("one"));
        cache.put(key(2), insights("two"));
        cache.put(key(3), insights("three"));

        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert!(cache.contains(&key(3)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = AnalysisCache::new(2);
        cache.put(key(1), insights("one"));
        cache.put(key(2), insights("two"));
        assert_eq!(cache.get(&key(1)).map(|i| i.sentiment), Some("one".to_string()));

        cache.put(key(3), insights("three"));
        assert!(cache.contains(&key(1)));
        assert!(!cache.contains(&key(2)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = AnalysisCache::new(0);
        cache.put(key(1), insights("one"));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key(1)), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_reinsert_replaces_value() {
        let mut cache = AnalysisCache::new(2);
        cache.put(key(1), insights("old"));
        cache.put(key(1), insights("new"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(1)).unwrap().sentiment, "new");
    }
}
