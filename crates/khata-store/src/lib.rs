//! # khata-store: Persistence Layer for Khata
//!
//! This crate persists the ledger collections behind a key-value port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Khata Data Flow                              │
//! │                                                                     │
//! │  Session (ledgers in memory, khata-core)                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  khata-store (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌─────────────┐  │   │
//! │  │   │   ShopStore   │   │ KeyValueStore │   │  Backends   │  │   │
//! │  │   │ (shop.rs)     │──►│   (kv.rs)     │◄──│ MemoryStore │  │   │
//! │  │   │ typed facade  │   │   the port    │   │ JsonFile-   │  │   │
//! │  │   │ per ledger    │   │               │   │ Store       │  │   │
//! │  │   └───────────────┘   └───────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  <data_dir>/products.json, obligations.json, ...                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValueStore` port and the in-memory backend
//! - [`json_file`] - File-backed implementation of the port
//! - [`shop`] - Typed load/save facade per ledger collection
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use khata_store::json_file::JsonFileStore;
//! use khata_store::shop::ShopStore;
//!
//! # fn main() -> Result<(), khata_store::StoreError> {
//! let backend = JsonFileStore::open("./khata-data")?;
//! let mut shop = ShopStore::new(backend);
//!
//! let stock = shop.load_stock()?;
//! // ... mutate through khata-core ...
//! shop.save_stock(&stock)?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json_file;
pub mod kv;
pub mod shop;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use shop::ShopStore;
