//! Recency List Module
//!
//! Doubly-linked list stored in an arena and linked by integer handles.
//!
//! ```text
//!   HEAD ◄──► [MRU] ◄──► ... ◄──► [LRU] ◄──► TAIL
//! ```
//!
//! `HEAD` and `TAIL` are sentinel slots that are never removed and never hold
//! a key, so linking and unlinking never have to special-case the ends.
//! Freed slots are recycled through a free list.

const HEAD: usize = 0;
const TAIL: usize = 1;

/// Stable handle to a node in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Arena-backed doubly-linked list ordered from most to least recent.
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    len: usize,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        let nodes = vec![
            Node {
                key: None,
                prev: HEAD,
                next: TAIL,
            },
            Node {
                key: None,
                prev: HEAD,
                next: TAIL,
            },
        ];
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD].next == TAIL
    }

    // == Push Front ==
    /// Inserts `key` immediately after the head sentinel.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key: Some(key),
            prev: HEAD,
            next: HEAD,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Moves a live node to the most-recent position.
    ///
    /// Returns false if `id` does not refer to a live node.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.is_live(id.0) {
            return false;
        }
        self.unlink(id.0);
        self.link_front(id.0);
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its key, recycling the slot.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        if !self.is_live(id.0) {
            return None;
        }
        self.unlink(id.0);
        self.free.push(id.0);
        self.len -= 1;
        self.nodes[id.0].key.take()
    }

    // == Pop Back ==
    /// Removes and returns the key immediately before the tail sentinel.
    pub fn pop_back(&mut self) -> Option<K> {
        let last = self.nodes[TAIL].prev;
        if last == HEAD {
            return None;
        }
        self.remove(NodeId(last))
    }

    /// Returns the least recent key without removing it.
    pub fn back(&self) -> Option<&K> {
        self.nodes[self.nodes[TAIL].prev].key.as_ref()
    }

    /// Returns the most recent key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.nodes[self.nodes[HEAD].next].key.as_ref()
    }

    /// Iterates keys from most to least recent.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            current: self.nodes[HEAD].next,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        idx > TAIL && self.nodes.get(idx).is_some_and(|node| node.key.is_some())
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}

/// Iterator over keys from most to least recent.
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    current: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.current];
        self.current = node.next;
        node.key.as_ref()
    }
}
