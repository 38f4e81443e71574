//! Memocache - In-memory caches with a memoization layer
//!
//! Provides LRU eviction, TTL expiration, and memoization over either store.

pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod tasks;

pub use cache::{shared, Cache, CacheStats, LruCache, SharedCache, TtlCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use memo::{MemoInput, MemoKey, Memoizer};
pub use tasks::spawn_sweep_task;
