//! Cache Module
//!
//! Provides in-memory caching with LRU eviction and TTL expiration.

mod clock;
mod entry;
mod lru;
mod stats;
mod ttl;


use std::sync::Arc;

use parking_lot::Mutex;

// Re-export public types
pub use clock::{Clock, MockClock, SystemClock};
pub use entry::TtlEntry;
pub use lru::LruCache;
pub use stats::CacheStats;
pub use ttl::TtlCache;

// == Cache Trait ==
/// The lookup/store contract shared by every backing store.
///
/// A miss is `None`, never an error. Implementations are not internally
/// synchronized; wrap them in a [`SharedCache`] to use them from several
/// threads.
pub trait Cache<K, V>: Send {
    /// Returns a clone of the stored value, if present and live.
    fn get(&mut self, key: &K) -> Option<V>;

    /// Stores `value` under `key`, fully replacing any previous entry.
    fn put(&mut self, key: K, value: V);

    /// Removes every entry.
    fn clear(&mut self);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Shared Cache ==
/// A cache behind one exclusive lock.
///
/// Every `get` or `put` runs as a single critical section: lookup plus
/// reorder, or lookup plus evict plus insert.
pub type SharedCache<C> = Arc<Mutex<C>>;

/// Wraps a cache for shared use.
pub fn shared<C>(cache: C) -> SharedCache<C> {
    Arc::new(Mutex::new(cache))
}
