//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the LRU cache can hold
    pub lru_capacity: usize,
    /// TTL in milliseconds applied to every TTL cache entry
    pub ttl_ms: u64,
    /// Interval in milliseconds between background sweeps
    pub sweep_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults, as does a
    /// zero sweep interval.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - LRU capacity (default: 100)
    /// - `CACHE_TTL_MS` - TTL in milliseconds (default: 60000)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lru_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.lru_capacity),
            ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.ttl_ms),
            sweep_interval_ms: parse_var("SWEEP_INTERVAL_MS")
                .filter(|&ms: &u64| ms > 0)
                .unwrap_or(defaults.sweep_interval_ms),
        }
    }

    /// TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lru_capacity: 100,
            ttl_ms: 60_000,
            sweep_interval_ms: 1_000,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
