//! # Shop Store
//!
//! Typed facade over the key-value port: one well-known key per ledger
//! collection.
//!
//! ## Usage
//! ```rust
//! use khata_core::money::Money;
//! use khata_core::stock::StockLedger;
//! use khata_store::kv::MemoryStore;
//! use khata_store::shop::ShopStore;
//!
//! let mut stock = StockLedger::new();
//! stock
//!     .add_product("CHAI-250", "Chai 250g", "Beverages",
//!                  Money::from_cents(300), Money::from_cents(450), 20, 5)
//!     .unwrap();
//!
//! let mut shop = ShopStore::new(MemoryStore::new());
//! shop.save_stock(&stock).unwrap();
//!
//! let reloaded = shop.load_stock().unwrap();
//! assert_eq!(reloaded.len(), 1);
//! ```

use tracing::debug;

use khata_core::advance::AdvanceBook;
use khata_core::obligation::ObligationLedger;
use khata_core::returns::ReturnProcessor;
use khata_core::stock::StockLedger;
use khata_core::types::{AdvancePayment, Obligation, Product, ReturnRequest, StockAdjustment};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Well-known collection keys.
///
/// These mirror the source system's local-storage keys: one JSON blob
/// per collection.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const STOCK_ADJUSTMENTS: &str = "stock_adjustments";
    pub const OBLIGATIONS: &str = "obligations";
    pub const RETURNS: &str = "returns";
    pub const ADVANCES: &str = "advances";
}

/// Loads and saves whole ledgers through any [`KeyValueStore`] backend.
///
/// A missing key loads as an empty ledger; first run needs no setup.
#[derive(Debug)]
pub struct ShopStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ShopStore<S> {
    /// Wraps a backend.
    pub fn new(store: S) -> Self {
        ShopStore { store }
    }

    /// Unwraps the backend.
    pub fn into_inner(self) -> S {
        self.store
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Loads the stock ledger (products + adjustment trail).
    pub fn load_stock(&self) -> StoreResult<StockLedger> {
        let products: Vec<Product> = self.store.get(keys::PRODUCTS)?.unwrap_or_default();
        let adjustments: Vec<StockAdjustment> =
            self.store.get(keys::STOCK_ADJUSTMENTS)?.unwrap_or_default();

        debug!(
            products = products.len(),
            adjustments = adjustments.len(),
            "Loaded stock ledger"
        );
        Ok(StockLedger::from_parts(products, adjustments))
    }

    /// Saves the stock ledger.
    pub fn save_stock(&mut self, stock: &StockLedger) -> StoreResult<()> {
        debug!(products = stock.len(), "Saving stock ledger");
        self.store.set(keys::PRODUCTS, &stock.list())?;
        self.store.set(keys::STOCK_ADJUSTMENTS, stock.adjustments())?;
        Ok(())
    }

    // =========================================================================
    // Obligations
    // =========================================================================

    /// Loads the obligation ledger.
    pub fn load_obligations(&self) -> StoreResult<ObligationLedger> {
        let obligations: Vec<Obligation> = self.store.get(keys::OBLIGATIONS)?.unwrap_or_default();

        debug!(obligations = obligations.len(), "Loaded obligation ledger");
        Ok(ObligationLedger::from_parts(obligations))
    }

    /// Saves the obligation ledger.
    pub fn save_obligations(&mut self, obligations: &ObligationLedger) -> StoreResult<()> {
        debug!(obligations = obligations.len(), "Saving obligation ledger");
        self.store.set(keys::OBLIGATIONS, &obligations.list())
    }

    // =========================================================================
    // Returns
    // =========================================================================

    /// Loads the return processor.
    pub fn load_returns(&self) -> StoreResult<ReturnProcessor> {
        let requests: Vec<ReturnRequest> = self.store.get(keys::RETURNS)?.unwrap_or_default();

        debug!(requests = requests.len(), "Loaded return requests");
        Ok(ReturnProcessor::from_parts(requests))
    }

    /// Saves the return processor.
    pub fn save_returns(&mut self, returns: &ReturnProcessor) -> StoreResult<()> {
        debug!(requests = returns.len(), "Saving return requests");
        self.store.set(keys::RETURNS, &returns.list())
    }

    // =========================================================================
    // Advances
    // =========================================================================

    /// Loads the advance book.
    pub fn load_advances(&self) -> StoreResult<AdvanceBook> {
        let advances: Vec<AdvancePayment> = self.store.get(keys::ADVANCES)?.unwrap_or_default();

        debug!(advances = advances.len(), "Loaded advance book");
        Ok(AdvanceBook::from_parts(advances))
    }

    /// Saves the advance book.
    pub fn save_advances(&mut self, advances: &AdvanceBook) -> StoreResult<()> {
        debug!(advances = advances.len(), "Saving advance book");
        self.store.set(keys::ADVANCES, advances.list())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use khata_core::money::Money;
    use khata_core::types::{ObligationKind, StockAdjustmentKind};
    use chrono::Utc;

    #[test]
    fn test_empty_store_loads_empty_ledgers() {
        let shop = ShopStore::new(MemoryStore::new());

        assert!(shop.load_stock().unwrap().is_empty());
        assert!(shop.load_obligations().unwrap().is_empty());
        assert!(shop.load_returns().unwrap().is_empty());
        assert!(shop.load_advances().unwrap().is_empty());
    }

    #[test]
    fn test_stock_roundtrip_preserves_adjustment_trail() {
        let mut stock = StockLedger::new();
        let product = stock
            .add_product(
                "CHAI-250",
                "Chai 250g",
                "Beverages",
                Money::from_cents(300),
                Money::from_cents(450),
                10,
                5,
            )
            .unwrap();
        stock
            .adjust(&product.id, StockAdjustmentKind::Subtract, 4, "damage")
            .unwrap();

        let mut shop = ShopStore::new(MemoryStore::new());
        shop.save_stock(&stock).unwrap();
        let reloaded = shop.load_stock().unwrap();

        assert_eq!(reloaded.get(&product.id).unwrap().stock_level, 6);
        assert_eq!(reloaded.adjustments().len(), 1);
        assert_eq!(reloaded.adjustments()[0].reason, "damage");
    }

    #[test]
    fn test_obligation_roundtrip_preserves_balances() {
        let mut obligations = ObligationLedger::new();
        let ob = obligations
            .create(
                ObligationKind::CustomerDebt,
                "Alice",
                Vec::new(),
                Money::from_cents(5_000),
                Money::from_cents(1_500),
                None,
                None,
            )
            .unwrap();

        let mut shop = ShopStore::new(MemoryStore::new());
        shop.save_obligations(&obligations).unwrap();
        let reloaded = shop.load_obligations().unwrap();

        let loaded = reloaded.get(&ob.id).unwrap();
        assert_eq!(loaded.paid_cents, 1_500);
        assert_eq!(loaded.pending_cents, 3_500);
        assert_eq!(loaded.paid_cents + loaded.pending_cents, loaded.total_cents);
    }

    #[test]
    fn test_advance_roundtrip() {
        let mut advances = AdvanceBook::new();
        advances
            .record_advance("emp-1", Money::from_cents(100), "advance", Utc::now())
            .unwrap();

        let mut shop = ShopStore::new(MemoryStore::new());
        shop.save_advances(&advances).unwrap();
        let mut reloaded = shop.load_advances().unwrap();

        // Deduction picks up where the saved state left off
        reloaded.deduct("emp-1", Money::from_cents(40)).unwrap();
        assert_eq!(reloaded.outstanding("emp-1").cents(), 60);
    }
}
