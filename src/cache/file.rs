// cache/file.rs — backend persisted as a single JSON file.
//
// Entries live in memory; the file is read once, lazily, on first access
// and written atomically (temp file + rename in the same directory) on
// `flush`. A missing or corrupt file starts the cache empty rather than
// failing — the cache is disposable state, not a database.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::{CacheBackend, CacheError};

pub struct FileBackend {
    path: PathBuf,
    /// BTreeMap so the file is stably ordered and diffs cleanly.
    entries: Option<BTreeMap<String, Value>>,
    dirty: bool,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), entries: None, dirty: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hex SHA-256 of the serialized entries. Used by the CLI to show
    /// whether two cache files carry the same content.
    pub fn fingerprint(&mut self) -> Result<String, CacheError> {
        let payload = serde_json::to_vec(self.entries_mut())?;
        Ok(hex::encode(Sha256::digest(&payload)))
    }

    fn entries_mut(&mut self) -> &mut BTreeMap<String, Value> {
        if self.entries.is_none() {
            self.entries = Some(self.load());
        }
        self.entries.as_mut().unwrap_or_else(|| unreachable!("loaded above"))
    }

    fn entries_ref(&self) -> Option<&BTreeMap<String, Value>> {
        self.entries.as_ref()
    }

    fn load(&self) -> BTreeMap<String, Value> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => {
                    debug!(path = %self.path.display(), "loaded cache file");
                    map
                }
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "corrupt cache file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable cache file, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn write_out(&mut self) -> Result<(), CacheError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        if let Some(dir) = &parent {
            fs::create_dir_all(dir)?;
        }
        let payload = serde_json::to_vec_pretty(self.entries_mut())?;
        // Same-directory temp file keeps the rename atomic on one filesystem.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        debug!(path = %self.path.display(), "flushed cache file");
        Ok(())
    }
}

impl CacheBackend for FileBackend {
    fn get(&mut self, key: &str) -> Option<Value> {
        self.entries_mut().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries_mut().insert(key.to_string(), value);
        self.dirty = true;
    }

    fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries_mut().remove(key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    fn contains(&self, key: &str) -> bool {
        match self.entries_ref() {
            Some(entries) => entries.contains_key(key),
            // Not loaded yet; a read-only probe falls back to the file.
            None => self.load().contains_key(key),
        }
    }

    fn clear(&mut self) {
        self.entries_mut().clear();
        self.dirty = true;
    }

    fn len(&self) -> usize {
        match self.entries_ref() {
            Some(entries) => entries.len(),
            None => self.load().len(),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self.entries_ref() {
            Some(entries) => entries.keys().cloned().collect(),
            None => self.load().keys().cloned().collect(),
        }
    }

    fn flush(&mut self) -> Result<(), CacheError> {
        if self.dirty || self.entries.is_some() {
            self.write_out()?;
        }
        Ok(())
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(err) = self.write_out() {
                warn!(path = %self.path.display(), %err, "failed to flush cache on drop");
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn flush_then_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let mut b = FileBackend::new(&path);
        b.set("alpha", json!({"n": 1}));
        b.set("beta", json!("two"));
        b.flush().unwrap();

        let mut reloaded = FileBackend::new(&path);
        assert_eq!(reloaded.get("alpha"), Some(json!({"n": 1})));
        assert_eq!(reloaded.get("beta"), Some(json!("two")));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let mut b = FileBackend::new(dir.path().join("nope.json"));
        assert_eq!(b.get("k"), None);
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{not json").unwrap();
        let mut b = FileBackend::new(&path);
        assert_eq!(b.get("k"), None);
        b.set("k", json!(1));
        b.flush().unwrap();
        let mut reloaded = FileBackend::new(&path);
        assert_eq!(reloaded.get("k"), Some(json!(1)));
    }

    #[test]
    fn flush_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep/nested/cache.json");
        let mut b = FileBackend::new(&path);
        b.set("k", json!(true));
        b.flush().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn drop_persists_dirty_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        {
            let mut b = FileBackend::new(&path);
            b.set("k", json!("kept"));
            // No explicit flush; Drop writes it out.
        }
        let mut reloaded = FileBackend::new(&path);
        assert_eq!(reloaded.get("k"), Some(json!("kept")));
    }

    #[test]
    fn delete_and_clear_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let mut b = FileBackend::new(&path);
        b.set("a", json!(1));
        b.set("b", json!(2));
        assert!(b.delete("a"));
        b.flush().unwrap();

        let mut r = FileBackend::new(&path);
        assert!(!r.contains("a"));
        r.clear();
        r.flush().unwrap();
        assert_eq!(FileBackend::new(&path).len(), 0);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let dir = tempdir().unwrap();
        let mut a = FileBackend::new(dir.path().join("a.json"));
        let mut b = FileBackend::new(dir.path().join("b.json"));
        a.set("k", json!(1));
        b.set("k", json!(1));
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        b.set("k", json!(2));
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}
