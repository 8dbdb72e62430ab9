// path_access — pattern-keyed object container.
//
// A `Container` maps path *patterns* (see `pattern.rs`) to values. Concrete
// paths like `user/42/profile` resolve against the stored patterns in
// insertion order, so callers register specific patterns before general
// ones. When nothing matches, `closest` offers a "did you mean" suggestion
// via weighted path-part hashing (see `similar.rs`).

pub mod pattern;
pub mod similar;

use serde_json::Value;
use tracing::debug;

pub use pattern::{PathPattern, PatternError};
pub use similar::PathHash;

/// Default cap on how far a fuzzy suggestion may be from the query.
/// Roughly: anything differing before the third segment is not suggested.
pub const DEFAULT_SUGGESTION_THRESHOLD: u64 = u64::MAX >> 2;

struct Entry {
    pattern: PathPattern,
    hash: PathHash,
    value: Value,
}

/// Insertion-ordered map from path patterns to values.
pub struct Container {
    entries: Vec<Entry>,
    suggestion_threshold: u64,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }

    /// Adjust how far `closest` will reach for a suggestion.
    pub fn with_suggestion_threshold(mut self, threshold: u64) -> Self {
        self.suggestion_threshold = threshold;
        self
    }

    /// Insert or overwrite the value under `pattern`. Overwriting keeps the
    /// original insertion position (and therefore match priority).
    pub fn set(&mut self, pattern: &str, value: Value) -> Result<(), PatternError> {
        let compiled = PathPattern::compile(pattern)?;
        let hash = PathHash::of(pattern);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern.source() == pattern) {
            entry.pattern = compiled;
            entry.hash = hash;
            entry.value = value;
        } else {
            self.entries.push(Entry { pattern: compiled, hash, value });
        }
        Ok(())
    }

    /// Remove the entry whose pattern string is exactly `pattern`.
    pub fn delete(&mut self, pattern: &str) -> Option<Value> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.pattern.source() == pattern)?;
        Some(self.entries.remove(idx).value)
    }

    /// Exact pattern-string membership (no pattern matching).
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.iter().any(|e| e.pattern.source() == pattern)
    }

    /// Stored pattern strings in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pattern.source())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a concrete path: exact pattern-string match first, then the
    /// first inserted pattern that matches.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(entry) = self.entries.iter().find(|e| e.pattern.source() == path) {
            return Some(&entry.value);
        }
        self.entries
            .iter()
            .find(|e| e.pattern.matches(path))
            .map(|e| &e.value)
    }

    /// Like `get`, but also returns the segments bound by wildcard/range
    /// positions of the winning pattern.
    pub fn capture(&self, path: &str) -> Option<(&Value, Vec<String>)> {
        // same priority as `get`: an exact pattern string beats any
        // wildcard match, and binds nothing
        if let Some(entry) = self.entries.iter().find(|e| e.pattern.source() == path) {
            return Some((&entry.value, Vec::new()));
        }
        for entry in &self.entries {
            if let Some(bound) = entry.pattern.captures(path) {
                return Some((&entry.value, bound));
            }
        }
        None
    }

    /// All (pattern, value) pairs whose pattern matches `path`, in
    /// insertion order.
    pub fn matches<'a>(&'a self, path: &'a str) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.entries
            .iter()
            .filter(move |e| e.pattern.matches(path))
            .map(|e| (e.pattern.source(), &e.value))
    }

    /// Nearest stored pattern by weighted path-part hash distance, within
    /// the suggestion threshold. Ties break toward earlier insertion.
    pub fn closest(&self, path: &str) -> Option<(&str, u64)> {
        let query = PathHash::of(path);
        let mut best: Option<(&str, u64)> = None;
        for entry in &self.entries {
            let d = query.distance(&entry.hash);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((entry.pattern.source(), d));
            }
        }
        match best {
            Some((source, d)) if d <= self.suggestion_threshold => {
                debug!(query = path, suggestion = source, distance = d, "fuzzy path suggestion");
                Some((source, d))
            }
            _ => None,
        }
    }

    /// `get` with a suggestion attached to the miss, for error messages.
    pub fn resolve(&self, path: &str) -> Result<&Value, PathMiss> {
        self.get(path).ok_or_else(|| PathMiss {
            path: path.to_string(),
            suggestion: self.closest(path).map(|(s, _)| s.to_string()),
        })
    }
}

/// A failed `resolve`, carrying the nearest stored pattern when one was
/// close enough.
#[derive(Debug, thiserror::Error)]
#[error("no pattern matches `{path}`{}", .suggestion.as_deref().map(|s| format!(" (did you mean `{s}`?)")).unwrap_or_default())]
pub struct PathMiss {
    pub path: String,
    pub suggestion: Option<String>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
