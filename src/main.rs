//! Mini Cache demo
//!
//! Fills a small cache past capacity, reads a few keys back and prints the
//! resulting statistics as JSON.
//!
//! Capacity, TTL and policy come from `CACHE_CAPACITY`, `CACHE_TTL_SECONDS`
//! and `CACHE_POLICY`; with none set the demo uses capacity 3 and LFU.

use std::env;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Cache, CacheError, Config, PolicyKind};

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if env::var("CACHE_CAPACITY").is_err() {
        config.capacity = 3;
    }
    if env::var("CACHE_POLICY").is_err() {
        config.policy = PolicyKind::Lfu;
    }
    info!(
        "Configuration loaded: capacity={}, ttl={:?}s, policy={}",
        config.capacity, config.ttl_seconds, config.policy
    );

    let mut cache: Cache<String, String> = Cache::from_config(&config);

    for (key, value) in [("a", "apple"), ("b", "banana"), ("c", "cherry")] {
        cache
            .put(key.to_string(), value.to_string())
            .with_context(|| format!("failed to store {key}"))?;
    }

    for key in ["c", "a"] {
        lookup(&mut cache, key)?;
    }

    cache
        .put("d".to_string(), "date".to_string())
        .context("failed to store d")?;

    for key in ["a", "b", "c", "d"] {
        lookup(&mut cache, key)?;
    }

    let stats = serde_json::to_string_pretty(&cache.stats())?;
    println!("{stats}");
    Ok(())
}

/// Prints the outcome of one lookup; only invariant violations abort the demo.
fn lookup(cache: &mut Cache<String, String>, key: &str) -> anyhow::Result<()> {
    match cache.get(&key.to_string()) {
        Ok(value) => println!("{key} => {value}"),
        Err(err @ (CacheError::NotFound(_) | CacheError::Expired(_))) => {
            println!("{key} => {err}")
        }
        Err(err) => {
            warn!("Lookup of {} failed: {}", key, err);
            return Err(err.into());
        }
    }
    Ok(())
}
