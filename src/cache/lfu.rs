//! LFU Policy Module
//!
//! Implements Least Frequently Used eviction.
//!
//! Keys sharing a frequency live in one group ordered by when they entered
//! it, so ties are broken by evicting the key that has sat at that frequency
//! the longest. Each group is a [`RecencyList`], which keeps removal of an
//! arbitrary key O(1).
//!
//! ```text
//!   min_freq = 1
//!   1 ─► [newest .. oldest]
//!   2 ─► [newest .. oldest]
//!   5 ─► [oldest]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::cache::list::{NodeId, RecencyList};
use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

#[derive(Debug, Clone, Copy)]
struct Slot {
    freq: u64,
    node: NodeId,
}

// == LFU Policy ==
/// Tracks access counts for LFU eviction.
#[derive(Debug)]
pub struct LfuPolicy<K> {
    /// Key to its frequency and position in that frequency's group
    slots: HashMap<K, Slot>,
    /// Frequency to keys at that frequency, oldest at the back
    groups: BTreeMap<u64, RecencyList<K>>,
    /// Smallest frequency with a non-empty group
    min_freq: Option<u64>,
}

impl<K> Default for LfuPolicy<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LfuPolicy<K>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            groups: BTreeMap::new(),
            min_freq: None,
        }
    }

    /// Returns the access count recorded for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.slots.get(key).map(|slot| slot.freq)
    }

    /// Returns the lowest frequency any tracked key has.
    pub fn min_frequency(&self) -> Option<u64> {
        self.min_freq
    }

    /// Returns the next eviction victim without removing it.
    pub fn peek_lfu(&self) -> Option<&K> {
        self.min_freq
            .and_then(|freq| self.groups.get(&freq))
            .and_then(|group| group.back())
    }

    fn push(&mut self, key: K, freq: u64) -> NodeId {
        self.groups.entry(freq).or_default().push_front(key)
    }

    // == Detach ==
    /// Removes `node` from the group at `freq`, dropping the group if it
    /// empties and moving the cursor off it.
    fn detach(&mut self, freq: u64, node: NodeId) {
        let emptied = match self.groups.get_mut(&freq) {
            Some(group) => {
                group.remove(node);
                group.is_empty()
            }
            None => false,
        };
        if emptied {
            self.groups.remove(&freq);
            self.refresh_min_if(freq);
        }
    }

    /// Recomputes the cursor when the group it points at has vanished.
    ///
    /// Frequencies can skip values (a key bumped to 3 while a key at 1 is
    /// removed), so the next minimum is looked up rather than assumed to be
    /// `freq + 1`.
    fn refresh_min_if(&mut self, freq: u64) {
        if self.min_freq == Some(freq) {
            self.min_freq = self.groups.keys().next().copied();
        }
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Hash + Eq + Clone + Debug,
{
    fn record_access(&mut self, key: &K) {
        match self.slots.get(key).copied() {
            None => {
                let node = self.push(key.clone(), 1);
                self.slots.insert(key.clone(), Slot { freq: 1, node });
                self.min_freq = Some(1);
            }
            Some(Slot { freq, node }) => {
                // Push into the next group first so the cursor can land on it
                let next = freq + 1;
                let new_node = self.push(key.clone(), next);
                self.detach(freq, node);
                self.slots.insert(
                    key.clone(),
                    Slot {
                        freq: next,
                        node: new_node,
                    },
                );
            }
        }
    }

    fn evict(&mut self) -> Result<K> {
        let freq = self.min_freq.ok_or(CacheError::EmptyPolicy)?;
        let group = self.groups.get_mut(&freq).ok_or(CacheError::EmptyPolicy)?;
        let key = group.pop_back().ok_or(CacheError::EmptyPolicy)?;
        if group.is_empty() {
            self.groups.remove(&freq);
            self.refresh_min_if(freq);
        }
        self.slots.remove(&key);
        Ok(key)
    }

    fn remove_key(&mut self, key: &K) -> Result<()> {
        let slot = self
            .slots
            .remove(key)
            .ok_or_else(|| CacheError::UntrackedKey(format!("{:?}", key)))?;
        self.detach(slot.freq, slot.node);
        Ok(())
    }

    fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_new() {
        let lfu: LfuPolicy<&str> = LfuPolicy::new();
        assert!(lfu.is_empty());
        assert_eq!(lfu.min_frequency(), None);
        assert_eq!(lfu.peek_lfu(), None);
    }

    #[test]
    fn test_lfu_frequency_counts() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.record_access(&"b");

        assert_eq!(lfu.frequency(&"a"), Some(3));
        assert_eq!(lfu.frequency(&"b"), Some(1));
        assert_eq!(lfu.frequency(&"c"), None);
        assert_eq!(lfu.min_frequency(), Some(1));
        assert_eq!(lfu.len(), 2);
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut lfu = LfuPolicy::new();
        for key in ["a", "b", "c", "c", "a"] {
            lfu.record_access(&key);
        }

        assert_eq!(lfu.evict(), Ok("b"));
        assert_eq!(lfu.min_frequency(), Some(2));
    }

    #[test]
    fn test_lfu_tie_break_is_fifo_within_group() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"b");
        lfu.record_access(&"c");

        assert_eq!(lfu.peek_lfu(), Some(&"a"));
        assert_eq!(lfu.evict(), Ok("a"));
        assert_eq!(lfu.evict(), Ok("b"));
        assert_eq!(lfu.evict(), Ok("c"));
        assert!(lfu.is_empty());
    }

    #[test]
    fn test_lfu_tie_break_uses_time_entered_group() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"b");
        // b reaches frequency 2 before a does
        lfu.record_access(&"b");
        lfu.record_access(&"a");

        assert_eq!(lfu.evict(), Ok("b"));
        assert_eq!(lfu.evict(), Ok("a"));
    }

    #[test]
    fn test_lfu_evict_empty() {
        let mut lfu: LfuPolicy<&str> = LfuPolicy::new();
        assert_eq!(lfu.evict(), Err(CacheError::EmptyPolicy));
    }

    #[test]
    fn test_lfu_remove_key() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"b");
        lfu.record_access(&"c");

        lfu.remove_key(&"b").unwrap();

        assert!(!lfu.contains(&"b"));
        assert_eq!(lfu.evict(), Ok("a"));
        assert_eq!(lfu.evict(), Ok("c"));
    }

    #[test]
    fn test_lfu_remove_unknown_key() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");

        assert!(matches!(
            lfu.remove_key(&"missing"),
            Err(CacheError::UntrackedKey(_))
        ));
        assert_eq!(lfu.len(), 1);
    }

    #[test]
    fn test_lfu_cursor_skips_frequency_gap_on_remove() {
        let mut lfu = LfuPolicy::new();
        // a climbs to 3, b sits alone at 1
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.record_access(&"b");
        assert_eq!(lfu.min_frequency(), Some(1));

        lfu.remove_key(&"b").unwrap();

        // No group at 2; the cursor must land on 3
        assert_eq!(lfu.min_frequency(), Some(3));
        assert_eq!(lfu.evict(), Ok("a"));
        assert_eq!(lfu.min_frequency(), None);
    }

    #[test]
    fn test_lfu_cursor_skips_frequency_gap_on_evict() {
        let mut lfu = LfuPolicy::new();
        for _ in 0..4 {
            lfu.record_access(&"hot");
        }
        lfu.record_access(&"cold");

        assert_eq!(lfu.evict(), Ok("cold"));
        assert_eq!(lfu.min_frequency(), Some(4));
        assert_eq!(lfu.evict(), Ok("hot"));
        assert_eq!(lfu.evict(), Err(CacheError::EmptyPolicy));
    }

    #[test]
    fn test_lfu_cursor_follows_bumped_key() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"a");

        assert_eq!(lfu.min_frequency(), Some(2));
        assert_eq!(lfu.frequency(&"a"), Some(2));
    }

    #[test]
    fn test_lfu_new_key_resets_cursor() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.record_access(&"b");

        assert_eq!(lfu.min_frequency(), Some(1));
        assert_eq!(lfu.peek_lfu(), Some(&"b"));
    }

    #[test]
    fn test_lfu_reinserted_key_starts_at_one() {
        let mut lfu = LfuPolicy::new();
        lfu.record_access(&"a");
        lfu.record_access(&"a");
        lfu.remove_key(&"a").unwrap();

        lfu.record_access(&"a");
        assert_eq!(lfu.frequency(&"a"), Some(1));
    }
}
