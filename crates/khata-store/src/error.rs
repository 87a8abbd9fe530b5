//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← Adds key context where it matters       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller surfaces a message; ledger state in memory is unaffected    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters the backend cannot safely map to a
    /// file name.
    ///
    /// ## When This Occurs
    /// - Empty key
    /// - Key with path separators or other non `[A-Za-z0-9_-]` bytes
    #[error("Invalid store key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// A stored blob could not be serialized or deserialized.
    ///
    /// ## When This Occurs
    /// - Hand-edited JSON file with a syntax error
    /// - Blob written by an incompatible version
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying file system operation failed.
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
