//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::ser::{Serialize, SerializeStruct, Serializer};

// == Cache Stats ==
/// Snapshot of LRU cache performance metrics.
///
/// `hits + misses` always equals the number of `get` calls issued since the
/// cache was created or last cleared. Serializes with a derived `hit_rate`
/// field alongside the counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Maximum number of resident entries
    pub capacity: usize,
    /// Current number of resident entries
    pub size: usize,
    /// Number of lookups that found a resident entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries evicted to make room for new keys
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats for a cache of the given capacity with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of lookups recorded.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes every counter, keeping the capacity.
    pub fn reset(&mut self) {
        *self = Self::new(self.capacity);
    }
}

impl Serialize for CacheStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CacheStats", 6)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("hits", &self.hits)?;
        state.serialize_field("misses", &self.misses)?;
        state.serialize_field("evictions", &self.evictions)?;
        state.serialize_field("hit_rate", &self.hit_rate())?;
        state.end()
    }
}
