//! # JSON File Backend
//!
//! File-system implementation of the [`KeyValueStore`] port.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  <data_dir>/                                                        │
//! │  ├── products.json                                                  │
//! │  ├── obligations.json                                               │
//! │  ├── returns.json                                                   │
//! │  └── advances.json                                                  │
//! │                                                                     │
//! │  One pretty-printed JSON document per key. Writes go through a      │
//! │  temp file and a rename, so a crash mid-write leaves the old        │
//! │  document intact rather than a truncated one.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreResult;
use crate::kv::{validate_key, KeyValueStore};

/// File-backed store: one `<key>.json` per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened JSON file store");
        Ok(JsonFileStore { dir })
    }

    /// The data directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;

        match fs::read_to_string(self.blob_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;

        // Write-then-rename keeps the previous blob intact on a crash
        let path = self.blob_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key = %key, bytes = value.len(), "Wrote blob");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;

        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => {
                debug!(key = %key, "Removed blob");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Fresh scratch directory per test.
    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("khata-store-test-{}-{}-{}", tag, std::process::id(), nanos))
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let mut store = JsonFileStore::open(&dir).unwrap();

        store.set_raw("products", "[1, 2, 3]").unwrap();
        assert_eq!(
            store.get_raw("products").unwrap().as_deref(),
            Some("[1, 2, 3]")
        );

        // Overwrite replaces
        store.set_raw("products", "[]").unwrap();
        assert_eq!(store.get_raw("products").unwrap().as_deref(), Some("[]"));

        assert!(store.get_raw("missing").unwrap().is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_remove_and_keys() {
        let dir = scratch_dir("keys");
        let mut store = JsonFileStore::open(&dir).unwrap();

        store.set_raw("a", "1").unwrap();
        store.set_raw("b", "2").unwrap();

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_escape() {
        let dir = scratch_dir("escape");
        let mut store = JsonFileStore::open(&dir).unwrap();

        assert!(store.set_raw("../escape", "x").is_err());
        assert!(store.get_raw("a/b").is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_open_reuses_existing_dir() {
        let dir = scratch_dir("reuse");
        {
            let mut store = JsonFileStore::open(&dir).unwrap();
            store.set_raw("persists", "\"yes\"").unwrap();
        }

        let store = JsonFileStore::open(&dir).unwrap();
        assert_eq!(
            store.get_raw("persists").unwrap().as_deref(),
            Some("\"yes\"")
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
