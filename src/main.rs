//! Memocache demo
//!
//! Walks through LRU ordering, TTL expiry, and memoized computation, logging
//! each step.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memocache::{shared, spawn_sweep_task, Config, LruCache, MemoKey, Memoizer, TtlCache};

/// Simulated slow computation.
fn expensive_computation(n: u64) -> u64 {
    thread::sleep(Duration::from_millis(100));
    n * n
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memocache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: lru_capacity={}, ttl={}ms, sweep_interval={}ms",
        config.lru_capacity, config.ttl_ms, config.sweep_interval_ms
    );

    lru_demo()?;
    ttl_demo().await?;
    run_memo_demo(&config).await?;
    sweeper_demo(&config).await?;

    info!("Demo complete");
    Ok(())
}

fn lru_demo() -> anyhow::Result<()> {
    info!("1. LRU cache");
    let mut lru = LruCache::new(3)?;

    lru.put("a", 1);
    lru.put("b", 2);
    lru.put("c", 3);
    info!(oldest = ?lru.peek_lru(), "Added a, b, c");

    lru.get(&"a");
    info!(oldest = ?lru.peek_lru(), "Accessed a");

    lru.put("d", 4);
    info!(
        b_resident = lru.get(&"b").is_some(),
        a_resident = lru.get(&"a").is_some(),
        "Added d"
    );

    let stats = lru.stats();
    info!(
        hit_rate = stats.hit_rate(),
        "Stats: {}",
        serde_json::to_string(&stats).context("serializing LRU stats")?
    );
    Ok(())
}

async fn ttl_demo() -> anyhow::Result<()> {
    info!("2. TTL cache");
    let mut ttl = TtlCache::new(Duration::from_secs(1))?;

    ttl.put("key1", "value1");
    info!(value = ?ttl.get(&"key1"), "Immediately after put");

    tokio::time::sleep(Duration::from_millis(1100)).await;
    info!(value = ?ttl.get(&"key1"), "After TTL expired");
    Ok(())
}

/// Runs the memoization demo on the blocking pool, since the computation sleeps.
async fn run_memo_demo(config: &Config) -> anyhow::Result<()> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || memo_demo(&config))
        .await
        .context("memo demo task failed")?
}

fn memo_demo(config: &Config) -> anyhow::Result<()> {
    info!("3. Memoized function");
    let cache = shared(LruCache::<MemoKey, u64>::new(config.lru_capacity)?);
    let memoized = Memoizer::new("expensive_computation", cache, expensive_computation);

    let start = Instant::now();
    let first = memoized.call_traced(5)?;
    let computed = start.elapsed();
    info!(result = first.value, source = ?first.source, elapsed = ?computed, "First call");

    let start = Instant::now();
    let second = memoized.call_traced(5)?;
    let cached = start.elapsed();
    info!(result = second.value, source = ?second.source, elapsed = ?cached, "Second call");

    let speedup = computed.as_secs_f64() / cached.as_secs_f64().max(f64::EPSILON);
    info!("Speedup: {:.1}x, stats: {:?}", speedup, memoized.cache().lock().stats());

    info!("4. LRU eviction under memoization");
    let small = shared(LruCache::<MemoKey, u64>::new(2)?);
    let memoized = Memoizer::new("expensive_computation", small, expensive_computation);
    for n in 0..4 {
        memoized.call(n)?;
    }
    let stats = memoized.cache().lock().stats();
    info!(size = stats.size, evictions = stats.evictions, "Cache after 4 distinct calls");
    Ok(())
}

/// TTL for the sweep demo: half the sweep interval, so entries expire before
/// the demo stops waiting.
fn sweep_demo_ttl(config: &Config) -> Duration {
    Duration::from_millis((config.sweep_interval_ms / 2).max(1))
}

/// Returns how many entries were left when the sweeper was stopped.
async fn sweeper_demo(config: &Config) -> anyhow::Result<usize> {
    info!("5. Background sweep");
    let ttl = sweep_demo_ttl(config);
    let cache = shared(TtlCache::new(ttl)?);
    {
        let mut guard = cache.lock();
        for n in 0..10u32 {
            guard.put(n, n.to_string());
        }
    }

    let sweeper = spawn_sweep_task(cache.clone(), config.sweep_interval());
    tokio::time::sleep(config.sweep_interval() * 2).await;
    sweeper.abort();

    let remaining = cache.lock().len();
    info!(remaining, ttl = ?ttl, "Sweeper stopped");
    Ok(remaining)
}
