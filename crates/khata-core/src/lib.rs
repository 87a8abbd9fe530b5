//! # khata-core: Pure Ledger Logic for Khata
//!
//! This crate is the **heart** of Khata. It contains the shop's entire
//! balance-keeping logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Khata Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │              UI / API layer (external)                      │   │
//! │  │   Inventory ─ Sales ─ Purchases ─ Debts ─ Payroll ─ Returns │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ khata-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │  ┌────────┐ ┌────────┐ ┌────────────┐ ┌──────────────────┐ │   │
//! │  │  │ money  │ │ stock  │ │ obligation │ │ cart / recorder  │ │   │
//! │  │  │ Money  │ │ levels │ │ total/paid │ │ dedup, sales,    │ │   │
//! │  │  │ exact  │ │ audit  │ │ /pending   │ │ purchases        │ │   │
//! │  │  └────────┘ └────────┘ └────────────┘ └──────────────────┘ │   │
//! │  │  ┌────────┐ ┌────────┐ ┌────────────┐                      │   │
//! │  │  │returns │ │advance │ │  reports   │                      │   │
//! │  │  │workflow│ │  FIFO  │ │ derivation │                      │   │
//! │  │  └────────┘ └────────┘ └────────────┘                      │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                 khata-store (persistence)                   │   │
//! │  │        KeyValueStore port, JSON blobs, seed binary          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Product, Obligation, ReturnRequest, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`stock`] - Stock ledger with bounded adjustments
//! - [`obligation`] - The total/paid/pending ledger
//! - [`cart`] - Sale staging with duplicate-product merging
//! - [`recorder`] - Recording sales, purchases, debts, payroll
//! - [`returns`] - Return requests and their approval workflow
//! - [`advance`] - Employee advances with FIFO deduction
//! - [`reports`] - Pure derivation functions for dashboards and export
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic logic, the clock is a parameter
//!    wherever status depends on it
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all failures are typed; a failed operation
//!    leaves the ledger unchanged
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::cart::Cart;
//! use khata_core::money::Money;
//! use khata_core::obligation::ObligationLedger;
//! use khata_core::recorder::TransactionRecorder;
//! use khata_core::stock::StockLedger;
//! use khata_core::types::PaymentTerms;
//!
//! let mut stock = StockLedger::new();
//! let mut obligations = ObligationLedger::new();
//!
//! let chai = stock
//!     .add_product("CHAI-250", "Chai 250g", "Beverages",
//!                  Money::from_cents(300), Money::from_cents(450), 20, 5)
//!     .unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&chai, 2).unwrap();
//!
//! let sale = TransactionRecorder::new(&mut obligations, &mut stock)
//!     .record_sale(&cart, "Alice", PaymentTerms::Full, None, None)
//!     .unwrap();
//!
//! assert_eq!(sale.paid_cents + sale.pending_cents, sale.total_cents);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod advance;
pub mod cart;
pub mod error;
pub mod money;
pub mod obligation;
pub mod recorder;
pub mod reports;
pub mod returns;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use khata_core::Money` instead of
// `use khata_core::money::Money`

pub use advance::AdvanceBook;
pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use obligation::ObligationLedger;
pub use recorder::TransactionRecorder;
pub use returns::ReturnProcessor;
pub use stock::StockLedger;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique lines allowed in a single cart
///
/// Prevents runaway carts and keeps transaction sizes reasonable.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Days before a due date during which an unpaid obligation counts as
/// DueSoon
pub const DUE_SOON_DAYS: i64 = 7;
