//! Clock Module
//!
//! Time source abstraction so expiry can be tested without real time passing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

// == Clock Trait ==
/// Supplies the current instant for TTL comparisons.
pub trait Clock: Send + Sync {
    /// Returns the current monotonic instant.
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

// == System Clock ==
/// Real clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// == Mock Clock ==
/// Manually advanced clock for tests.
///
/// Clones share the same offset, so a test can keep one handle and give
/// another to the cache under test.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    // == Constructor ==
    /// Creates a mock clock frozen at the current real instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    // == Advance ==
    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Total time the clock has been advanced.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock()
    }
}
