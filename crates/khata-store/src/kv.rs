//! # Key-Value Port
//!
//! The storage port the rest of Khata programs against.
//!
//! ## The Port Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStore Port                               │
//! │                                                                     │
//! │  ShopStore<S> (typed facade)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  trait KeyValueStore            get_raw / set_raw / remove / keys   │
//! │       │                                                             │
//! │       ├────────────► MemoryStore     (HashMap; tests, ephemeral)    │
//! │       │                                                             │
//! │       └────────────► JsonFileStore   (one <key>.json per key)       │
//! │                                                                     │
//! │  The ledger core never sees this trait; it stays storage-free.      │
//! │  Only the facade and the backends live here.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Key Validation
// =============================================================================

/// Validates a store key.
///
/// Keys become file names in the file backend, so the character set is
/// restricted to `[A-Za-z0-9_-]`.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "only letters, digits, hyphens, and underscores are allowed".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// The Port
// =============================================================================

/// Key-based read/write of JSON blobs.
///
/// Implementations store opaque strings; the typed `get`/`set` helpers
/// layer serde on top so callers never touch raw JSON.
pub trait KeyValueStore {
    /// Reads the raw blob for a key, `None` if absent.
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes the raw blob for a key, replacing any previous value.
    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a key. Returns whether it existed.
    fn remove(&mut self, key: &str) -> StoreResult<bool>;

    /// Lists all present keys, in no particular order.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Reads and deserializes the value for a key.
    fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes a value for a key.
    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set_raw(key, &raw)
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore {
            blobs: HashMap::new(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.blobs.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.blobs.remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.blobs.keys().cloned().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
