//! TTL Cache Module
//!
//! Unbounded store whose entries expire a fixed duration after being written.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::{Cache, Clock, SystemClock, TtlEntry};
use crate::error::{CacheError, Result};

// == TTL Cache ==
/// Key-value store with a single fixed time-to-live for every entry.
///
/// Expiry is absolute from write time: reads never extend it, overwrites
/// restart it. Expired entries are purged lazily by the read that observes
/// them, or eagerly by [`TtlCache::sweep`]. Nothing bounds memory between
/// sweeps; callers that need that spawn a sweeper task. A TTL too large to
/// add to the current instant makes entries that never expire.
#[derive(Debug)]
pub struct TtlCache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, TtlEntry<V>>,
    ttl: Duration,
    clock: C,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Hash + Eq,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache using the system clock.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidTtl` if `ttl` is zero.
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Hash + Eq,
    V: Clone,
    C: Clock,
{
    /// Creates an empty cache reading time from `clock`.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidTtl` if `ttl` is zero.
    pub fn with_clock(ttl: Duration, clock: C) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }

        Ok(Self {
            entries: HashMap::new(),
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;

        if entry.is_expired(now) {
            self.entries.remove(key);
            debug!(remaining = self.entries.len(), "TTL lazy eviction");
            return None;
        }

        Some(entry.value.clone())
    }

    // == Put ==
    /// Stores a key-value pair, replacing any previous entry and its expiry.
    pub fn put(&mut self, key: K, value: V) {
        let entry = TtlEntry::new(value, self.clock.now(), self.ttl);
        self.entries.insert(key, entry);
    }

    // == Sweep ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "TTL sweep");
        }
        removed
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Time To Live ==
    /// Returns how long a live entry has left, or `None` if absent or expired.
    ///
    /// Does not purge expired entries.
    pub fn time_to_live(&self, key: &K) -> Option<Duration> {
        self.entries
            .get(key)
            .and_then(|entry| entry.remaining(self.clock.now()))
    }

    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache stores no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the time-to-live applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V, C> Cache<K, V> for TtlCache<K, V, C>
where
    K: Hash + Eq + Send,
    V: Clone + Send,
    C: Clock,
{
    fn get(&mut self, key: &K) -> Option<V> {
        TtlCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        TtlCache::put(self, key, value);
    }

    fn clear(&mut self) {
        TtlCache::clear(self);
    }

    fn len(&self) -> usize {
        TtlCache::len(self)
    }
}
