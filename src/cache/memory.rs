// cache/memory.rs — in-process backend: HashMap plus LRU insertion order.
//
// Capacity is optional; when set, inserting past it evicts the least
// recently used key. Reads refresh recency. Hit/miss counters feed
// `hit_rate()` for the CLI stats output.

use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use super::CacheBackend;

pub struct MemoryBackend {
    capacity: Option<usize>,
    map: HashMap<String, Value>,
    /// Recency order (front = oldest, back = newest).
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl MemoryBackend {
    /// No eviction; grows until cleared.
    pub fn unbounded() -> Self {
        Self {
            capacity: None,
            map: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Evict the least recently used entry once `capacity` is exceeded.
    /// A capacity of zero stores nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Hit rate 0.0–1.0; 0.0 before any reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(value) = self.map.get(key).cloned() {
            self.touch(key);
            self.hits += 1;
            Some(value)
        } else {
            self.misses += 1;
            None
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        if self.capacity == Some(0) {
            return;
        }
        if self.map.contains_key(key) {
            self.touch(key);
            self.map.insert(key.to_string(), value);
            return;
        }
        if let Some(cap) = self.capacity {
            while self.map.len() >= cap {
                match self.order.pop_front() {
                    Some(evict) => {
                        self.map.remove(&evict);
                    }
                    None => break,
                }
            }
        }
        self.order.push_back(key.to_string());
        self.map.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) -> bool {
        if self.map.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn keys(&self) -> Vec<String> {
        // Insertion/recency order, oldest first.
        self.order.iter().cloned().collect()
    }

    fn flush(&mut self) -> Result<(), super::CacheError> {
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
