//! # Stock Ledger
//!
//! Tracks per-product quantity and applies bounded adjustments.
//!
//! ## Adjustment Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Adjustments                                │
//! │                                                                     │
//! │  Add(q)       new = current + q        updates last_restocked      │
//! │  Subtract(q)  new = max(0, current-q)  clamps at zero              │
//! │  Set(q)       new = max(0, q)                                      │
//! │                                                                     │
//! │  Every successful adjustment appends an audit record:              │
//! │    who-knows-why ──► reason (mandatory)                            │
//! │    before/after  ──► previous_level → new_level                    │
//! │                                                                     │
//! │  Subtract never drives the level negative. Over-subtraction is     │
//! │  absorbed silently; the audit record still shows the requested     │
//! │  quantity, so the shortfall stays visible after the fact.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, StockAdjustment, StockAdjustmentKind};
use crate::validation::{
    validate_adjustment_quantity, validate_name, validate_non_negative_amount, validate_reason,
    validate_sku,
};

/// The product collection plus its adjustment audit trail.
///
/// Owns every `Product` in the session. All stock mutations go through
/// [`adjust`](StockLedger::adjust), so the `stock_level >= 0` invariant
/// and the audit trail cannot be bypassed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockLedger {
    products: HashMap<String, Product>,
    adjustments: Vec<StockAdjustment>,
}

impl StockLedger {
    /// Creates an empty stock ledger.
    pub fn new() -> Self {
        StockLedger {
            products: HashMap::new(),
            adjustments: Vec::new(),
        }
    }

    /// Rebuilds a ledger from persisted parts.
    pub fn from_parts(products: Vec<Product>, adjustments: Vec<StockAdjustment>) -> Self {
        StockLedger {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            adjustments,
        }
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Adds a new product to the catalog.
    ///
    /// ## Validation
    /// - SKU format and uniqueness
    /// - Non-empty name
    /// - Non-negative prices, initial stock, and minimum stock
    ///
    /// ## Returns
    /// A clone of the created product (the ledger keeps ownership).
    #[allow(clippy::too_many_arguments)]
    pub fn add_product(
        &mut self,
        sku: &str,
        name: &str,
        category: &str,
        purchase_price: Money,
        sale_price: Money,
        initial_stock: i64,
        min_stock: i64,
    ) -> CoreResult<Product> {
        validate_sku(sku)?;
        validate_name("product name", name)?;
        validate_non_negative_amount("purchase price", purchase_price)?;
        validate_non_negative_amount("sale price", sale_price)?;
        validate_adjustment_quantity(initial_stock)?;
        validate_adjustment_quantity(min_stock)?;

        if self.find_by_sku(sku).is_some() {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: sku.trim().to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: sku.trim().to_string(),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            stock_level: initial_stock,
            min_stock,
            purchase_price_cents: purchase_price.cents(),
            sale_price_cents: sale_price.cents(),
            last_restocked: None,
            created_at: now,
            updated_at: now,
        };

        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    /// Inserts or replaces a product wholesale. Load path for the store
    /// layer; interactive edits go through `add_product`/`adjust`.
    pub fn upsert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Gets a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Finds a product by SKU (trimmed, exact match).
    pub fn find_by_sku(&self, sku: &str) -> Option<&Product> {
        let sku = sku.trim();
        self.products.values().find(|p| p.sku == sku)
    }

    /// Lists all products, ordered by SKU.
    pub fn list(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| a.sku.cmp(&b.sku));
        products
    }

    /// Removes a product (explicit delete only).
    pub fn remove(&mut self, product_id: &str) -> CoreResult<Product> {
        self.products
            .remove(product_id)
            .ok_or_else(|| CoreError::not_found("Product", product_id))
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Adjustments
    // =========================================================================

    /// Applies a bounded stock adjustment and returns the new level.
    ///
    /// ## Rules
    /// - `Add`: `new = current + quantity`; stamps `last_restocked`
    /// - `Subtract`: `new = max(0, current - quantity)`
    /// - `Set`: `new = max(0, quantity)`
    /// - Fails `Validation` when `quantity < 0` for Add/Subtract or the
    ///   reason is blank; fails `NotFound` for an unknown product
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::stock::StockLedger;
    /// use khata_core::types::StockAdjustmentKind;
    ///
    /// let mut stock = StockLedger::new();
    /// let p = stock
    ///     .add_product("CHAI-250", "Chai 250g", "Beverages",
    ///                  Money::from_cents(300), Money::from_cents(450), 5, 10)
    ///     .unwrap();
    ///
    /// // Subtracting more than the shelf holds clamps at zero
    /// let level = stock
    ///     .adjust(&p.id, StockAdjustmentKind::Subtract, 8, "damage")
    ///     .unwrap();
    /// assert_eq!(level, 0);
    /// ```
    pub fn adjust(
        &mut self,
        product_id: &str,
        kind: StockAdjustmentKind,
        quantity: i64,
        reason: &str,
    ) -> CoreResult<i64> {
        match kind {
            StockAdjustmentKind::Add | StockAdjustmentKind::Subtract => {
                validate_adjustment_quantity(quantity)?
            }
            // Set clamps negatives instead of rejecting them
            StockAdjustmentKind::Set => {}
        }
        validate_reason(reason)?;

        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| CoreError::not_found("Product", product_id))?;

        let previous_level = product.stock_level;
        let new_level = match kind {
            StockAdjustmentKind::Add => previous_level + quantity,
            StockAdjustmentKind::Subtract => (previous_level - quantity).max(0),
            StockAdjustmentKind::Set => quantity.max(0),
        };

        let now = Utc::now();
        product.stock_level = new_level;
        product.updated_at = now;
        if matches!(kind, StockAdjustmentKind::Add) {
            product.last_restocked = Some(now);
        }

        self.adjustments.push(StockAdjustment {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            kind,
            quantity,
            reason: reason.trim().to_string(),
            previous_level,
            new_level,
            adjusted_at: now,
        });

        Ok(new_level)
    }

    /// The adjustment audit trail, oldest first.
    pub fn adjustments(&self) -> &[StockAdjustment] {
        &self.adjustments
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockStatus;

    fn ledger_with_product(initial_stock: i64, min_stock: i64) -> (StockLedger, String) {
        let mut stock = StockLedger::new();
        let product = stock
            .add_product(
                "CHAI-250",
                "Chai 250g",
                "Beverages",
                Money::from_cents(300),
                Money::from_cents(450),
                initial_stock,
                min_stock,
            )
            .unwrap();
        (stock, product.id)
    }

    #[test]
    fn test_add_product_validates() {
        let mut stock = StockLedger::new();
        assert!(stock
            .add_product("", "Chai", "Bev", Money::zero(), Money::zero(), 0, 0)
            .is_err());
        assert!(stock
            .add_product(
                "CHAI-250",
                "Chai",
                "Bev",
                Money::from_cents(-1),
                Money::zero(),
                0,
                0
            )
            .is_err());
    }

    #[test]
    fn test_add_product_rejects_duplicate_sku() {
        let (mut stock, _) = ledger_with_product(5, 10);
        let err = stock
            .add_product(
                "CHAI-250",
                "Chai again",
                "Beverages",
                Money::from_cents(300),
                Money::from_cents(450),
                0,
                0,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_adjust_add_updates_last_restocked() {
        let (mut stock, id) = ledger_with_product(5, 10);

        let level = stock
            .adjust(&id, StockAdjustmentKind::Add, 20, "supplier delivery")
            .unwrap();
        assert_eq!(level, 25);
        assert!(stock.get(&id).unwrap().last_restocked.is_some());
    }

    #[test]
    fn test_adjust_subtract_clamps_at_zero() {
        let (mut stock, id) = ledger_with_product(5, 10);

        let level = stock
            .adjust(&id, StockAdjustmentKind::Subtract, 8, "damage")
            .unwrap();
        assert_eq!(level, 0);
        assert_eq!(stock.get(&id).unwrap().stock_status(), StockStatus::OutOfStock);
        // Subtract does not touch last_restocked
        assert!(stock.get(&id).unwrap().last_restocked.is_none());
    }

    #[test]
    fn test_adjust_set_clamps_negative() {
        let (mut stock, id) = ledger_with_product(5, 10);

        assert_eq!(
            stock
                .adjust(&id, StockAdjustmentKind::Set, 42, "recount")
                .unwrap(),
            42
        );
        assert_eq!(
            stock
                .adjust(&id, StockAdjustmentKind::Set, -3, "recount")
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_adjust_validation_failures() {
        let (mut stock, id) = ledger_with_product(5, 10);

        // Negative quantity for Add/Subtract
        assert!(stock
            .adjust(&id, StockAdjustmentKind::Add, -1, "oops")
            .is_err());
        assert!(stock
            .adjust(&id, StockAdjustmentKind::Subtract, -1, "oops")
            .is_err());

        // Blank reason
        assert!(stock.adjust(&id, StockAdjustmentKind::Add, 1, "  ").is_err());

        // Unknown product
        assert!(matches!(
            stock
                .adjust("nope", StockAdjustmentKind::Add, 1, "x")
                .unwrap_err(),
            CoreError::NotFound { .. }
        ));

        // Failed adjustments change nothing
        assert_eq!(stock.get(&id).unwrap().stock_level, 5);
        assert!(stock.adjustments().is_empty());
    }

    #[test]
    fn test_adjustment_audit_trail() {
        let (mut stock, id) = ledger_with_product(5, 10);

        stock
            .adjust(&id, StockAdjustmentKind::Add, 10, "delivery")
            .unwrap();
        stock
            .adjust(&id, StockAdjustmentKind::Subtract, 3, "damage")
            .unwrap();

        let trail = stock.adjustments();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].previous_level, 5);
        assert_eq!(trail[0].new_level, 15);
        assert_eq!(trail[1].previous_level, 15);
        assert_eq!(trail[1].new_level, 12);
        assert_eq!(trail[1].reason, "damage");
    }

    #[test]
    fn test_list_ordered_by_sku() {
        let mut stock = StockLedger::new();
        for sku in ["SUGAR-1KG", "ATTA-5KG", "CHAI-250"] {
            stock
                .add_product(
                    sku,
                    sku,
                    "Grocery",
                    Money::from_cents(100),
                    Money::from_cents(150),
                    1,
                    1,
                )
                .unwrap();
        }

        let skus: Vec<&str> = stock.list().iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["ATTA-5KG", "CHAI-250", "SUGAR-1KG"]);
    }

    #[test]
    fn test_remove_product() {
        let (mut stock, id) = ledger_with_product(5, 10);
        assert!(stock.remove(&id).is_ok());
        assert!(stock.remove(&id).is_err());
        assert!(stock.is_empty());
    }
}
