// cache — key/value cache abstraction with pluggable storage backends.
//
// Backends are dumb string→JSON maps with last-write-wins semantics. The
// `Cache` facade layers the shared behavior on top: key namespacing and
// per-entry TTL. Expired entries read as absent and are removed on the
// read that discovers them, so backends never need a sweeper.

pub mod file;
pub mod memory;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use file::FileBackend;
pub use memory::MemoryBackend;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Storage backend contract. `get` takes `&mut self` so backends may keep
/// recency state or load lazily.
pub trait CacheBackend {
    fn get(&mut self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    /// Returns true when the key existed.
    fn delete(&mut self, key: &str) -> bool;
    fn contains(&self, key: &str) -> bool;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn keys(&self) -> Vec<String>;
    /// Persist pending state, where the backend has any.
    fn flush(&mut self) -> Result<(), CacheError>;
}

/// Stored envelope: the caller's value plus an optional expiry stamp.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

/// Cache facade: namespacing + TTL over any backend.
pub struct Cache {
    backend: Box<dyn CacheBackend>,
    namespace: String,
    default_ttl: Option<Duration>,
}

impl Cache {
    pub fn new(backend: Box<dyn CacheBackend>) -> Self {
        Self { backend, namespace: String::new(), default_ttl: None }
    }

    /// Prefix every key with `ns:`. Separate namespaces on one backend do
    /// not see each other's keys.
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// TTL applied by `set`; `set_with_ttl` overrides per entry.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    fn full_key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.namespace, key)
        }
    }

    fn strip_key<'a>(&self, full: &'a str) -> Option<&'a str> {
        if self.namespace.is_empty() {
            Some(full)
        } else {
            full.strip_prefix(&self.namespace)?.strip_prefix(':')
        }
    }

    pub fn get(&mut self, key: &str) -> Option<Value> {
        let full = self.full_key(key);
        let raw = self.backend.get(&full)?;
        let envelope: Envelope = match serde_json::from_value(raw.clone()) {
            Ok(e) => e,
            // Foreign value in the backing store; surface it untouched
            // without hitting the backend a second time.
            Err(_) => return Some(raw),
        };
        if let Some(expires_at) = envelope.expires_at {
            if expires_at <= Utc::now() {
                self.backend.delete(&full);
                return None;
            }
        }
        Some(envelope.value)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        let ttl = self.default_ttl;
        self.store(key, value, ttl);
    }

    pub fn set_with_ttl(&mut self, key: &str, value: Value, ttl: Duration) {
        self.store(key, value, Some(ttl));
    }

    fn store(&mut self, key: &str, value: Value, ttl: Option<Duration>) {
        let envelope = Envelope {
            value,
            expires_at: ttl.map(|t| Utc::now() + t),
        };
        let raw = serde_json::to_value(&envelope)
            .unwrap_or_else(|_| serde_json::json!({ "value": null }));
        self.backend.set(&self.full_key(key), raw);
    }

    pub fn delete(&mut self, key: &str) -> bool {
        self.backend.delete(&self.full_key(key))
    }

    /// Membership without recency side effects. Expired-but-unswept entries
    /// still count; use `get` for TTL-accurate reads.
    pub fn contains(&self, key: &str) -> bool {
        self.backend.contains(&self.full_key(key))
    }

    /// Remove every key in this namespace. Without a namespace, clears the
    /// whole backend.
    pub fn clear(&mut self) {
        if self.namespace.is_empty() {
            self.backend.clear();
            return;
        }
        for full in self.backend.keys() {
            if self.strip_key(&full).is_some() {
                self.backend.delete(&full);
            }
        }
    }

    /// Keys in this namespace, with the prefix stripped.
    pub fn keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .iter()
            .filter_map(|k| self.strip_key(k))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush(&mut self) -> Result<(), CacheError> {
        self.backend.flush()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
