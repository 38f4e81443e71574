//! Cache Entry Module
//!
//! Defines the structure for TTL cache entries.

use std::time::{Duration, Instant};

// == TTL Entry ==
/// A stored value together with its absolute expiry instant.
#[derive(Debug, Clone)]
pub struct TtlEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at and after which the entry is treated as absent.
    /// `None` when the TTL reaches past what `Instant` can represent.
    pub expires_at: Option<Instant>,
}

impl<V> TtlEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    ///
    /// A `ttl` too large to add to `now` yields an entry that never expires.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// a read at exactly the expiry instant already misses.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or `None` once expired.
    ///
    /// A non-expiring entry reports `Duration::MAX`.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.expires_at {
            None => Some(Duration::MAX),
            Some(expires_at) if now < expires_at => Some(expires_at - now),
            Some(_) => None,
        }
    }
}
