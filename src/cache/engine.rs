//! Cache Engine Module
//!
//! Ties a [`Store`], an [`EvictionPolicy`] and optional TTL expiry together.
//!
//! The store, the policy and the write-timestamp map always agree on which
//! keys exist: every operation below mutates all three for a key or none.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace, warn};

use crate::cache::{
    Clock, CacheStats, EvictionPolicy, LfuPolicy, LruPolicy, MemoryStore, Rejected, Store,
    SystemClock,
};
use crate::config::{Config, PolicyKind};
use crate::error::{CacheError, Result};

/// Eviction policy chosen at runtime.
pub type DynPolicy<K> = Box<dyn EvictionPolicy<K> + Send>;

// == Cache ==
/// Key-value cache with pluggable storage, eviction and TTL.
///
/// Expiry is lazy: an entry whose TTL has elapsed is only dropped when a
/// `get` discovers it.
pub struct Cache<K, V, S = MemoryStore<K, V>, P = DynPolicy<K>> {
    store: S,
    policy: P,
    ttl: Option<Duration>,
    ttl_seconds: Option<u64>,
    /// Time of the last successful `put` for each resident key
    written_at: HashMap<K, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
    _value: PhantomData<fn() -> V>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Clone,
{
    // == From Config ==
    /// Builds a [`MemoryStore`]-backed cache with the configured policy.
    pub fn from_config(config: &Config) -> Self {
        let policy: DynPolicy<K> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
        };
        Self::new(
            MemoryStore::new(config.capacity),
            policy,
            config.ttl_seconds,
        )
    }
}

impl<K, V, S, P> Cache<K, V, S, P>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    S: Store<K, V>,
    P: EvictionPolicy<K>,
{
    // == Constructor ==
    /// Creates a cache reading wall-clock time from the system.
    ///
    /// # Arguments
    /// * `store` - Backing storage; its capacity bounds the cache
    /// * `policy` - Chooses victims when the store is full
    /// * `ttl_seconds` - Maximum age since the last write; None = never expire
    pub fn new(store: S, policy: P, ttl_seconds: Option<u64>) -> Self {
        Self::with_clock(store, policy, ttl_seconds, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    ///
    /// A TTL too large to represent is treated as no expiry.
    pub fn with_clock(
        store: S,
        policy: P,
        ttl_seconds: Option<u64>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl =
            ttl_seconds.and_then(|secs| Duration::from_std(StdDuration::from_secs(secs)).ok());
        Self {
            store,
            policy,
            ttl,
            ttl_seconds: ttl.and(ttl_seconds),
            written_at: HashMap::new(),
            clock,
            stats: CacheStats::new(),
            _value: PhantomData,
        }
    }

    // == Get ==
    /// Retrieves a value by key and records the access with the policy.
    ///
    /// # Errors
    /// - [`CacheError::NotFound`] if the key is not resident
    /// - [`CacheError::Expired`] if its TTL has elapsed; the entry is removed
    pub fn get(&mut self, key: &K) -> Result<V> {
        if let Some(ttl) = self.ttl {
            let Some(&written) = self.written_at.get(key) else {
                self.stats.record_miss();
                return Err(CacheError::NotFound(format!("{:?}", key)));
            };

            if self.clock.now() - written > ttl {
                self.drop_entry(key)?;
                self.stats.record_expiration();
                self.stats.set_total_entries(self.store.len());
                debug!("Expired key {:?} after {}s", key, ttl.num_seconds());
                return Err(CacheError::Expired(format!("{:?}", key)));
            }
        }

        match self.store.get(key).cloned() {
            Ok(value) => {
                self.policy.record_access(key);
                self.stats.record_hit();
                trace!("Cache hit for key {:?}", key);
                Ok(value)
            }
            Err(err) => {
                self.stats.record_miss();
                Err(err)
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair, evicting one entry if the store is full.
    ///
    /// Overwriting a resident key refreshes its TTL window and counts as an
    /// access. Only errors signalling a store/policy desync are returned.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let now = self.clock.now();

        if let Err(Rejected { key: k, value: v }) = self.store.try_put(key.clone(), value) {
            let victim = report(self.policy.evict())?;
            report(self.store.delete(&victim))?;
            self.written_at.remove(&victim);
            self.stats.record_eviction();
            debug!("Evicted key {:?} to make room for {:?}", victim, k);

            // Exactly one slot was freed, so the retry can only fail on a desync
            if self.store.try_put(k, v).is_err() {
                return report(Err(CacheError::CacheFull(format!(
                    "no room for {:?} after evicting {:?}",
                    key, victim
                ))));
            }
        }

        self.policy.record_access(&key);
        self.written_at.insert(key, now);
        self.stats.set_total_entries(self.store.len());
        Ok(())
    }

    // == Remove ==
    /// Removes an entry from the store, the policy and the TTL index.
    ///
    /// Ignores TTL: an expired but not yet collected entry is still returned.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let value = self.store.delete(key)?;
        report(self.policy.remove_key(key))?;
        self.written_at.remove(key);
        self.stats.set_total_entries(self.store.len());
        debug!("Removed key {:?}", key);
        Ok(value)
    }

    /// Returns true if `key` is resident. Does not count as an access and
    /// does not check TTL.
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Configured TTL in seconds, if entries expire.
    pub fn ttl_seconds(&self) -> Option<u64> {
        self.ttl_seconds
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    // == Consistency Check ==
    /// Returns true if the store, the policy and the TTL index track exactly
    /// the same keys.
    pub fn check_consistency(&self) -> bool {
        self.store.len() == self.policy.len()
            && self.written_at.len() == self.store.len()
            && self
                .written_at
                .keys()
                .all(|key| self.store.contains_key(key) && self.policy.contains(key))
    }

    fn drop_entry(&mut self, key: &K) -> Result<()> {
        report(self.store.delete(key))?;
        report(self.policy.remove_key(key))?;
        self.written_at.remove(key);
        Ok(())
    }
}

impl<K, V, S, P> Debug for Cache<K, V, S, P>
where
    S: Debug,
    P: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Logs errors that can only come from a store/policy desync before they
/// propagate.
fn report<T>(result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        warn!("Cache invariant violated: {}", err);
        err
    })
}
