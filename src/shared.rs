//! Shared Cache Module
//!
//! Thread-safe handle for using one cache from many tasks.
//!
//! Each operation holds a single exclusive lock for its whole duration, so
//! the store, policy and TTL updates of one call are never interleaved with
//! another's.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{Cache, CacheStats};
use crate::config::Config;
use crate::error::Result;

/// Cloneable, lock-guarded handle to a [`Cache`].
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<Cache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Clone,
{
    /// Wraps an existing cache.
    pub fn new(cache: Cache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a shared cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Cache::from_config(config))
    }

    pub async fn get(&self, key: &K) -> Result<V> {
        self.inner.lock().await.get(key)
    }

    pub async fn put(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().await.put(key, value)
    }

    pub async fn remove(&self, key: &K) -> Result<V> {
        self.inner.lock().await.remove(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub async fn with_cache<R>(&self, f: impl FnOnce(&mut Cache<K, V>) -> R) -> R {
        let mut cache = self.inner.lock().await;
        f(&mut cache)
    }
}
