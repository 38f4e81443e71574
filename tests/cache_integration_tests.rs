//! Integration Tests for the public cache API
//!
//! Exercises LRU and TTL stores and the memoizer through the crate root.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use memocache::cache::MockClock;
use memocache::memo::CallSource;
use memocache::{shared, CacheError, LruCache, MemoKey, Memoizer, SharedCache, TtlCache};

// == LRU Scenarios ==

#[test]
fn test_lru_get_protects_recent_key() {
    let mut cache = LruCache::new(2).unwrap();

    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.get(&"a"), Some(1));
    cache.put("c", 3);

    let resident: HashSet<&str> = ["a", "b", "c"]
        .into_iter()
        .filter(|key| cache.get(key).is_some())
        .collect();
    assert_eq!(resident, HashSet::from(["a", "c"]));
}

#[test]
fn test_lru_first_inserted_is_evicted() {
    for capacity in 1..=6 {
        let mut cache = LruCache::new(capacity).unwrap();
        for key in 0..=capacity {
            cache.put(key, key * 10);
            assert!(cache.len() <= capacity);
        }

        assert_eq!(cache.get(&0), None, "capacity {}", capacity);
        assert_eq!(cache.get(&capacity), Some(capacity * 10));
    }
}

#[test]
fn test_lru_stats_count_every_get() {
    let mut cache = LruCache::new(3).unwrap();
    cache.put("x", "1");

    for i in 0..10 {
        let key = if i % 3 == 0 { "x" } else { "y" };
        cache.get(&key);
    }

    let stats = cache.stats();
    assert_eq!(stats.hits, 4);
    assert_eq!(stats.misses, 6);
    assert_eq!(stats.hits + stats.misses, 10);
    assert!((stats.hit_rate() - 0.4).abs() < f64::EPSILON);

    cache.clear();
    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.size), (0, 0, 0));
    assert_eq!(stats.hit_rate(), 0.0);
}

#[test]
fn test_lru_zero_capacity_is_construction_error() {
    let result: memocache::Result<LruCache<String, String>> = LruCache::new(0);
    assert_eq!(result.err(), Some(CacheError::InvalidCapacity));
}

// == TTL Scenarios ==

#[test]
fn test_ttl_expires_after_clock_advance() {
    let clock = MockClock::new();
    let mut cache = TtlCache::with_clock(Duration::from_secs(1), clock.clone()).unwrap();

    cache.put("x", "v");
    assert_eq!(cache.get(&"x"), Some("v"));

    clock.advance(Duration::from_millis(1100));
    assert_eq!(cache.get(&"x"), None);
    assert!(cache.is_empty());
}

#[test]
fn test_ttl_sweep_counts() {
    let clock = MockClock::new();
    let mut cache = TtlCache::with_clock(Duration::from_secs(5), clock.clone()).unwrap();

    for i in 0..3 {
        cache.put(i, i);
    }
    clock.advance(Duration::from_secs(3));
    for i in 3..7 {
        cache.put(i, i);
    }
    clock.advance(Duration::from_secs(3));

    assert_eq!(cache.len(), 7);
    assert_eq!(cache.sweep(), 3);
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_ttl_zero_is_construction_error() {
    let result: memocache::Result<TtlCache<String, String>> = TtlCache::new(Duration::ZERO);
    assert!(matches!(result, Err(CacheError::InvalidTtl(_))));
}

#[test]
fn test_ttl_concurrent_put_never_duplicates() {
    let clock = MockClock::new();
    let cache = shared(TtlCache::with_clock(Duration::from_secs(1), clock.clone()).unwrap());
    cache.lock().put("k".to_string(), 0u32);
    clock.advance(Duration::from_secs(2));

    thread::scope(|scope| {
        for n in 0..4u32 {
            let cache = Arc::clone(&cache);
            scope.spawn(move || {
                for _ in 0..50 {
                    cache.lock().get(&"k".to_string());
                    cache.lock().put("k".to_string(), n);
                }
            });
        }
    });

    let mut guard = cache.lock();
    assert_eq!(guard.len(), 1);
    assert!(guard.get(&"k".to_string()).is_some());
}

// == Memoizer Scenarios ==

#[test]
fn test_memoizer_computes_once() {
    let calls = AtomicUsize::new(0);
    let cache: SharedCache<LruCache<MemoKey, u64>> = shared(LruCache::new(3).unwrap());
    let square = Memoizer::new("square", cache, |n: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        n * n
    });

    let first = square.call_traced(5).unwrap();
    let second = square.call_traced(5).unwrap();

    assert_eq!(first.value, second.value);
    assert_eq!(first.source, CallSource::Computed);
    assert_eq!(second.source, CallSource::Cached);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let stats = square.cache().lock().stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn test_memoizer_over_ttl_cache() {
    let clock = MockClock::new();
    let cache: SharedCache<TtlCache<MemoKey, String, MockClock>> =
        shared(TtlCache::with_clock(Duration::from_secs(30), clock.clone()).unwrap());
    let calls = AtomicUsize::new(0);
    let greet = Memoizer::new("greet", cache, |(name, excited): (String, bool)| {
        calls.fetch_add(1, Ordering::SeqCst);
        if excited {
            format!("Hello, {}!", name)
        } else {
            format!("Hello, {}.", name)
        }
    });

    assert_eq!(greet.call(("Ada".to_string(), true)).unwrap(), "Hello, Ada!");
    assert_eq!(greet.call(("Ada".to_string(), false)).unwrap(), "Hello, Ada.");
    assert_eq!(greet.call(("Ada".to_string(), true)).unwrap(), "Hello, Ada!");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    clock.advance(Duration::from_secs(31));
    greet.call(("Ada".to_string(), true)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_memoizer_rejects_nan_input() {
    let cache: SharedCache<LruCache<MemoKey, f64>> = shared(LruCache::new(3).unwrap());
    let sqrt = Memoizer::new("sqrt", cache, f64::sqrt);

    assert_eq!(sqrt.call(16.0).unwrap(), 4.0);
    assert!(matches!(
        sqrt.call(f64::NAN),
        Err(CacheError::KeyDerivation(_))
    ));
}

#[test]
fn test_memoizer_shared_across_threads() {
    let calls = AtomicUsize::new(0);
    let cache: SharedCache<LruCache<MemoKey, u64>> = shared(LruCache::new(64).unwrap());
    let fib = Memoizer::new("fib", cache, |n: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        (0..n).fold((0u64, 1u64), |(a, b), _| (b, a + b)).0
    });

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for n in 0..20 {
                    fib.call(n).unwrap();
                }
            });
        }
    });

    assert_eq!(fib.call(10).unwrap(), 55);
    assert!(calls.load(Ordering::SeqCst) >= 20);
    assert!(calls.load(Ordering::SeqCst) <= 80);
    assert_eq!(fib.cache().lock().len(), 20);
}
