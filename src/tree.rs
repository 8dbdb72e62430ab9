// tree.rs — nested mutable object/array container with dot-path access.
//
// Paths are dot-separated: `"server.hosts.0.name"`. A segment that parses as
// a canonical non-negative integer (no leading zeros, except "0" itself)
// indexes arrays; everything else is an object key. Setting through missing
// intermediates creates them; last write wins on conflicts.

use serde_json::{Map, Value};

/// Split a dot path. The empty path yields no segments and refers to the root.
fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// `"7"` → `Some(7)`, but `"07"` and `"x"` → `None`. Leading-zero segments
/// stay object keys so `set_path("a.00", …)` never aliases `a.0`.
fn array_index(segment: &str) -> Option<usize> {
    if segment == "0" {
        return Some(0);
    }
    if segment.starts_with('0') || segment.is_empty() {
        return None;
    }
    segment.parse().ok()
}

/// A mutable JSON tree with path-based access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    root: Value,
}

impl Tree {
    /// Empty tree (root is an empty object).
    pub fn new() -> Self {
        Self { root: Value::Object(Map::new()) }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Read the value at `path`. The empty path returns the root.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for seg in segments(path) {
            current = match current {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(array_index(seg)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Typed string read, for the common case.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    /// Write `value` at `path`, creating intermediate objects as needed.
    ///
    /// A numeric segment descending into an array extends it with nulls when
    /// indexing past the end. Scalars in the way are replaced by objects.
    /// The empty path replaces the root.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let segs = segments(path);
        if segs.is_empty() {
            self.root = value;
            return;
        }
        let mut current = &mut self.root;
        for (i, seg) in segs.iter().enumerate() {
            let last = i == segs.len() - 1;
            // Decide the container shape at this level.
            let idx = array_index(seg);
            let is_array = matches!(current, Value::Array(_)) && idx.is_some();
            if !is_array && !matches!(current, Value::Object(_)) {
                *current = Value::Object(Map::new());
            }
            match current {
                Value::Array(items) => {
                    let idx = idx.unwrap_or(0);
                    if idx >= items.len() {
                        items.resize(idx + 1, Value::Null);
                    }
                    if last {
                        items[idx] = value;
                        return;
                    }
                    current = &mut items[idx];
                }
                Value::Object(map) => {
                    if last {
                        map.insert(seg.to_string(), value);
                        return;
                    }
                    current = map.entry(seg.to_string()).or_insert(Value::Null);
                }
                _ => unreachable!("container normalized above"),
            }
        }
    }

    /// Remove and return the value at `path`.
    ///
    /// Array removal shifts later elements down. Returns `None` when the path
    /// does not resolve. The empty path swaps the root for an empty object.
    pub fn delete_path(&mut self, path: &str) -> Option<Value> {
        let segs = segments(path);
        if segs.is_empty() {
            return Some(std::mem::replace(&mut self.root, Value::Object(Map::new())));
        }
        let (leaf, parents) = segs.split_last()?;
        let mut current = &mut self.root;
        for seg in parents {
            current = match current {
                Value::Object(map) => map.get_mut(*seg)?,
                Value::Array(items) => items.get_mut(array_index(seg)?)?,
                _ => return None,
            };
        }
        match current {
            Value::Object(map) => map.remove(*leaf),
            Value::Array(items) => {
                let idx = array_index(leaf)?;
                if idx < items.len() {
                    Some(items.remove(idx))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Deep-merge `other` into this tree. Objects merge recursively; arrays
    /// and scalars from `other` replace wholesale (last write wins).
    pub fn merge(&mut self, other: Value) {
        merge_value(&mut self.root, other);
    }
}

fn merge_value(base: &mut Value, other: Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (k, v) in other_map {
                match base_map.get_mut(&k) {
                    Some(slot) => merge_value(slot, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, other) => *slot = other,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
