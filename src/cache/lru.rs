//! LRU Policy Module
//!
//! Implements Least Recently Used eviction on top of [`RecencyList`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::cache::list::{NodeId, RecencyList};
use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

// == LRU Policy ==
/// Tracks access order for LRU eviction.
///
/// - Front of the list = most recently used
/// - Back of the list = least recently used (next victim)
#[derive(Debug)]
pub struct LruPolicy<K> {
    /// Access order
    list: RecencyList<K>,
    /// Key to list handle
    nodes: HashMap<K, NodeId>,
}

impl<K> Default for LruPolicy<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruPolicy<K>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            list: RecencyList::new(),
            nodes: HashMap::new(),
        }
    }

    // == Peek LRU ==
    /// Returns the next eviction victim without removing it.
    pub fn peek_lru(&self) -> Option<&K> {
        self.list.back()
    }

    /// Iterates tracked keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Hash + Eq + Clone + Debug,
{
    fn record_access(&mut self, key: &K) {
        match self.nodes.get(key) {
            Some(&id) => {
                self.list.move_to_front(id);
            }
            None => {
                let id = self.list.push_front(key.clone());
                self.nodes.insert(key.clone(), id);
            }
        }
    }

    fn evict(&mut self) -> Result<K> {
        let key = self.list.pop_back().ok_or(CacheError::EmptyPolicy)?;
        self.nodes.remove(&key);
        Ok(key)
    }

    fn remove_key(&mut self, key: &K) -> Result<()> {
        let id = self
            .nodes
            .remove(key)
            .ok_or_else(|| CacheError::UntrackedKey(format!("{:?}", key)))?;
        self.list.remove(id);
        Ok(())
    }

    fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
