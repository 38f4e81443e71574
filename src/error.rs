//! Error types for the cache subsystem
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and memoization.
///
/// A cache miss is never an error; lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// LRU cache constructed with a capacity of zero
    #[error("Invalid capacity: LRU cache capacity must be at least 1")]
    InvalidCapacity,

    /// TTL cache constructed with a zero time-to-live
    #[error("Invalid TTL: {0:?} (must be greater than zero)")]
    InvalidTtl(Duration),

    /// Memoizer input could not be encoded into a cache key
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache subsystem.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(CacheError::InvalidCapacity
            .to_string()
            .contains("at least 1"));
        assert!(CacheError::InvalidTtl(Duration::ZERO)
            .to_string()
            .contains("0ns"));
        assert_eq!(
            CacheError::KeyDerivation("NaN".to_string()).to_string(),
            "Key derivation failed: NaN"
        );
    }
}
