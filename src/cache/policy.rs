//! Eviction Policy Module
//!
//! Capability shared by every eviction strategy the cache can use.

use crate::error::Result;

// == Eviction Policy Trait ==
/// Decides which key leaves the cache when the store is full.
///
/// The policy only tracks keys; values, capacity and expiry belong to the
/// store and the cache.
pub trait EvictionPolicy<K> {
    /// Records a successful read or write of `key`, starting to track it if
    /// it is new. Safe to call repeatedly for the same key.
    fn record_access(&mut self, key: &K);

    /// Selects a victim, stops tracking it and returns it.
    ///
    /// Fails with [`CacheError::EmptyPolicy`](crate::error::CacheError::EmptyPolicy)
    /// if nothing is tracked.
    fn evict(&mut self) -> Result<K>;

    /// Stops tracking `key` without treating it as the eviction target.
    ///
    /// Fails with [`CacheError::UntrackedKey`](crate::error::CacheError::UntrackedKey)
    /// if `key` is not tracked.
    fn remove_key(&mut self, key: &K) -> Result<()>;

    fn contains(&self, key: &K) -> bool;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, P> EvictionPolicy<K> for Box<P>
where
    P: EvictionPolicy<K> + ?Sized,
{
    fn record_access(&mut self, key: &K) {
        (**self).record_access(key)
    }

    fn evict(&mut self) -> Result<K> {
        (**self).evict()
    }

    fn remove_key(&mut self, key: &K) -> Result<()> {
        (**self).remove_key(key)
    }

    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
