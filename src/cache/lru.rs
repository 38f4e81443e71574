//! LRU Cache Module
//!
//! Fixed-capacity store with least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};

/// Slab node in the recency list
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Capacity-bounded cache ordered by recency of access.
///
/// Entries live in a slab of nodes linked into a doubly-linked list:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// The key map and the list always hold the same set of keys, and the
/// number of resident entries never exceeds the capacity.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to slab index
    map: HashMap<K, usize>,
    /// Node storage; `None` slots are on the free list
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        Ok(Self {
            map: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
            stats: CacheStats::new(capacity),
        })
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit marks the key most recently used and counts as a hit; an absent
    /// key counts as a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.stats.record_hit();
                self.move_to_front(idx);
                self.nodes[idx].as_ref().map(|node| node.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is overwritten and the key becomes
    /// most recently used. If the key is new and the cache is full, the least
    /// recently used entry is evicted first.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.nodes[idx].as_mut() {
                node.value = value;
            }
            self.move_to_front(idx);
            return;
        }

        if self.map.len() >= self.capacity {
            self.evict_oldest();
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });
        self.link_front(idx);
        self.map.insert(key, idx);
    }

    // == Clear ==
    /// Removes all entries and resets statistics.
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.stats.reset();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.map.len();
        stats
    }

    // == Peek ==
    /// Returns the next eviction candidate without touching recency or stats.
    pub fn peek_lru(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.nodes[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) {
        let Some(tail_idx) = self.tail else {
            return;
        };

        self.unlink(tail_idx);
        if let Some(node) = self.nodes[tail_idx].take() {
            self.map.remove(&node.key);
            self.stats.record_eviction();
            debug!(
                capacity = self.capacity,
                "LRU eviction: dropped least recently used entry"
            );
        }
        self.free_list.push(tail_idx);
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);
        if let Some(node) = self.nodes[idx].as_mut() {
            node.next = self.head;
        }
        self.link_front(idx);
    }

    /// Attaches a detached node (whose `next` already points at the old head).
    fn link_front(&mut self, idx: usize) {
        if let Some(head_idx) = self.head {
            if let Some(head) = self.nodes[head_idx].as_mut() {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.nodes[prev_idx].as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.nodes[next_idx].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc_node(&mut self) -> usize {
        match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.nodes.push(None);
                self.nodes.len() - 1
            }
        }
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    fn recency_order(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.nodes[idx].as_ref().expect("linked slot is occupied");
            keys.push(node.key.clone());
            cursor = node.next;
        }
        keys
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    fn get(&mut self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}
