//! # Cart Module
//!
//! Staging area for sale recording.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                  │
//! │                                                                     │
//! │  UI Action                Operation              Cart Change        │
//! │  ─────────                ─────────              ───────────        │
//! │                                                                     │
//! │  Click Product ─────────► add_item() ──────────► merge or push      │
//! │                                                                     │
//! │  Change Quantity ───────► update_quantity() ───► line.qty = n       │
//! │                                                  (0 removes)        │
//! │                                                                     │
//! │  Click Remove ──────────► remove_item() ───────► line dropped       │
//! │                                                                     │
//! │  Record Sale ───────────► line_items() ────────► frozen LineItems   │
//! │                                                                     │
//! │  NOTE: lines are unique by product_id. Adding a product that is     │
//! │  already in the cart increases its quantity; it never creates a     │
//! │  second line.                                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, Product};
use crate::validation::validate_line_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// A line in the cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog
/// - name and price are frozen copies taken when the line was added, so
///   the cart stays consistent even if the product is edited underneath
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID (UUID)
    pub product_id: String,

    /// SKU at time of adding (frozen)
    pub sku: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Sale price in cents at time of adding (frozen)
    pub unit_price_cents: i64,

    /// Quantity in cart
    pub quantity: i64,

    /// When this line was first added
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The sale price is captured at this moment. If the product price
    /// changes in the catalog, this line retains the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price_cents: product.sale_price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

/// The cart being assembled for a sale.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Quantity on every line is > 0 (update to 0 removes the line)
/// - Maximum lines: [`MAX_CART_LINES`]
/// - Maximum quantity per line: [`MAX_LINE_QUANTITY`]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Cart {
    /// Lines in the cart
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already
    /// present.
    ///
    /// ## Behavior
    /// - If product already in cart: increases that line's quantity
    /// - If product not in cart: appends a new line
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_line_quantity(quantity)?;

        // Merge with an existing line for this product
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of a line in the cart.
    ///
    /// ## Behavior
    /// - If quantity is 0: removes the line
    /// - If product not found: returns NotFound
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        validate_line_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
            Ok(())
        } else {
            Err(CoreError::not_found("Cart line", product_id))
        }
    }

    /// Removes a line from the cart by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::not_found("Cart line", product_id))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart subtotal.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Freezes the cart into sale line items.
    ///
    /// Line quantities are already validated positive, so this cannot
    /// fail.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|i| LineItem {
                product_id: i.product_id.clone(),
                product_name: i.name.clone(),
                quantity: i.quantity,
                unit_price_cents: i.unit_price_cents,
                total_cents: i.line_total_cents(),
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn test_product(id: &str, sale_price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            category: "Test".to_string(),
            stock_level: 100,
            min_stock: 5,
            purchase_price_cents: sale_price_cents / 2,
            sale_price_cents,
            last_restocked: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let product = test_product("1", 10_000); // Rs 100.00

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        // Exactly one line for the product, quantity summed
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(
            cart.items[0].line_total_cents(),
            Money::from_cents(10_000).multiply_quantity(5).cents()
        );
    }

    #[test]
    fn test_cart_rejects_bad_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert!(cart.add_item(&product, 0).is_err());
        assert!(cart.add_item(&product, -1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_merge_respects_max_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 900).unwrap();
        let err = cart.add_item(&product, 100).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // Failed merge leaves the line unchanged
        assert_eq!(cart.items[0].quantity, 900);
    }

    #[test]
    fn test_cart_update_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity("1", 7).unwrap();
        assert_eq!(cart.items[0].quantity, 7);

        // Zero removes the line
        cart.update_quantity("1", 0).unwrap();
        assert!(cart.is_empty());

        assert!(cart.update_quantity("1", 3).is_err());
    }

    #[test]
    fn test_cart_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2).unwrap();
        cart.add_item(&test_product("2", 500), 1).unwrap();

        cart.remove_item("1").unwrap();
        assert_eq!(cart.line_count(), 1);
        assert!(cart.remove_item("1").is_err());

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_items_freeze_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 450), 3).unwrap();

        let lines = cart.line_items();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].total_cents, 1350);
        assert_eq!(
            lines[0].total_cents,
            lines[0].unit_price_cents * lines[0].quantity
        );
    }
}
