//! TTL Sweeper Task
//!
//! Opt-in background task that periodically sweeps expired entries from a
//! shared TTL cache.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedCache, TtlCache};

/// Spawns a background task that periodically calls [`TtlCache::sweep`].
///
/// The task sleeps for `interval` between sweeps and holds the cache lock
/// only for the duration of each sweep. It runs until the returned handle is
/// aborted or the runtime shuts down.
///
/// # Example
/// ```ignore
/// let cache = shared(TtlCache::new(Duration::from_secs(60))?);
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task<K, V, C>(
    cache: SharedCache<TtlCache<K, V, C>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Hash + Eq + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.lock().sweep();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared, MockClock};

    type TestCache = SharedCache<TtlCache<String, String, MockClock>>;

    fn mock_cache(ttl: Duration) -> (TestCache, MockClock) {
        let clock = MockClock::new();
        let cache = shared(TtlCache::with_clock(ttl, clock.clone()).unwrap());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let (cache, clock) = mock_cache(Duration::from_secs(1));
        cache.lock().put("expire_soon".to_string(), "value".to_string());

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(10));

        clock.advance(Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Removed without any read observing it
        assert_eq!(cache.lock().len(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_live_entries() {
        let (cache, clock) = mock_cache(Duration::from_secs(3600));
        cache.lock().put("long_lived".to_string(), "value".to_string());

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(10));

        clock.advance(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            cache.lock().get(&"long_lived".to_string()),
            Some("value".to_string())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _clock) = mock_cache(Duration::from_secs(1));

        let handle = spawn_sweep_task(cache, Duration::from_millis(10));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
