//! Store Module
//!
//! Capacity-bounded backing storage. A store knows nothing about eviction
//! or expiry; it simply refuses new keys once full.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{CacheError, Result};

// == Store Trait ==
/// Backing key-value storage pluggable into [`Cache`](crate::cache::Cache).
///
/// Implementations must reject a *new* key with [`CacheError::CacheFull`]
/// once `len() == capacity()`. Overwriting a key that is already present
/// never grows the store and must succeed even at capacity.
pub trait Store<K, V> {
    /// Returns a reference to the value stored under `key`.
    fn get(&self, key: &K) -> Result<&V>;

    /// Inserts or overwrites `key`, handing the entry back if the store is
    /// full and `key` is new.
    fn try_put(&mut self, key: K, value: V) -> std::result::Result<(), Rejected<K, V>>;

    /// Removes `key`, returning its value.
    fn delete(&mut self, key: &K) -> Result<V>;

    fn contains_key(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or overwrites `key`, failing with [`CacheError::CacheFull`]
    /// if the store is full and `key` is new.
    fn put(&mut self, key: K, value: V) -> Result<()> {
        self.try_put(key, value).map_err(|_| {
            CacheError::CacheFull(format!("store capacity of {} exceeded", self.capacity()))
        })
    }
}

// == Rejected Write ==
/// Entry returned by [`Store::try_put`] when there was no room for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<K, V> {
    pub key: K,
    pub value: V,
}

// == Memory Store ==
/// HashMap-backed [`Store`].
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V> {
    entries: HashMap<K, V>,
    capacity: usize,
}

impl<K, V> MemoryStore<K, V>
where
    K: Hash + Eq,
{
    // == Constructor ==
    /// Creates an empty store that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
        }
    }
}

impl<K, V> Store<K, V> for MemoryStore<K, V>
where
    K: Hash + Eq + Debug,
{
    fn get(&self, key: &K) -> Result<&V> {
        self.entries
            .get(key)
            .ok_or_else(|| CacheError::NotFound(format!("{:?}", key)))
    }

    fn try_put(&mut self, key: K, value: V) -> std::result::Result<(), Rejected<K, V>> {
        // Overwrites are allowed at capacity since they free and take the same slot
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            return Err(Rejected { key, value });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &K) -> Result<V> {
        self.entries
            .remove(key)
            .ok_or_else(|| CacheError::NotFound(format!("{:?}", key)))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
