//! # Transaction Recorder
//!
//! Turns a cart or selection plus an initial payment into obligations,
//! and keeps the stock ledger in step.
//!
//! ## Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Recording a Sale                                 │
//! │                                                                     │
//! │  Cart [3 × Chai @ Rs 4.50]                                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  validate: cart non-empty, customer named,                          │
//! │            installment ⇒ due date, 0 ≤ paid ≤ total                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  resolve every cart product up front (NotFound aborts BEFORE        │
//! │  anything is written - no partial updates)                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ObligationLedger::create(kind: Sale, items, total, paid)           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StockLedger: Subtract each line quantity                           │
//! │                                                                     │
//! │  Recording a purchase runs the same shape in reverse and ADDS       │
//! │  the bought quantity to stock.                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::obligation::ObligationLedger;
use crate::stock::StockLedger;
use crate::types::{LineItem, Obligation, ObligationKind, PaymentTerms, StockAdjustmentKind};
use crate::validation::{validate_line_quantity, validate_name, validate_non_negative_amount};

/// Records transactions against the obligation and stock ledgers.
///
/// Borrows both ledgers mutably for the duration of the recording
/// session; the borrow checker enforces the single-writer model.
#[derive(Debug)]
pub struct TransactionRecorder<'a> {
    obligations: &'a mut ObligationLedger,
    stock: &'a mut StockLedger,
}

impl<'a> TransactionRecorder<'a> {
    /// Creates a recorder over the two ledgers.
    pub fn new(obligations: &'a mut ObligationLedger, stock: &'a mut StockLedger) -> Self {
        TransactionRecorder { obligations, stock }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale from the cart.
    ///
    /// ## Arguments
    /// * `cart` - must have at least one line
    /// * `customer_name` - must be non-empty
    /// * `terms` - `Full` pays the whole total now; `Installment` pays
    ///   `amount_paid` now and the rest by `due_date`
    /// * `amount_paid` - required for `Installment`, ignored for `Full`
    /// * `due_date` - required for `Installment`
    ///
    /// ## Side Effects
    /// Subtracts each line's quantity from stock (clamped at zero, per
    /// stock ledger policy).
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::cart::Cart;
    /// use khata_core::money::Money;
    /// use khata_core::obligation::ObligationLedger;
    /// use khata_core::recorder::TransactionRecorder;
    /// use khata_core::stock::StockLedger;
    /// use khata_core::types::PaymentTerms;
    ///
    /// let mut obligations = ObligationLedger::new();
    /// let mut stock = StockLedger::new();
    /// let product = stock
    ///     .add_product("CHAI-250", "Chai 250g", "Beverages",
    ///                  Money::from_cents(300), Money::from_cents(10_000), 10, 2)
    ///     .unwrap();
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(&product, 2).unwrap();
    ///
    /// let sale = TransactionRecorder::new(&mut obligations, &mut stock)
    ///     .record_sale(&cart, "Alice", PaymentTerms::Full, None, None)
    ///     .unwrap();
    ///
    /// assert_eq!(sale.total_cents, 20_000);
    /// assert_eq!(sale.pending_cents, 0);
    /// assert_eq!(stock.get(&product.id).unwrap().stock_level, 8);
    /// ```
    pub fn record_sale(
        &mut self,
        cart: &Cart,
        customer_name: &str,
        terms: PaymentTerms,
        amount_paid: Option<Money>,
        due_date: Option<DateTime<Utc>>,
    ) -> CoreResult<Obligation> {
        if cart.is_empty() {
            return Err(ValidationError::Required {
                field: "cart items".to_string(),
            }
            .into());
        }
        validate_name("customer name", customer_name)?;

        let total = Money::from_cents(cart.subtotal_cents());

        let paid = match terms {
            PaymentTerms::Full => total,
            PaymentTerms::Installment => {
                if due_date.is_none() {
                    return Err(ValidationError::Required {
                        field: "due date".to_string(),
                    }
                    .into());
                }
                let paid = amount_paid.ok_or(ValidationError::Required {
                    field: "amount paid".to_string(),
                })?;
                Self::check_payment_bounds(paid, total)?;
                paid
            }
        };

        // Resolve every product before touching either ledger
        for item in &cart.items {
            if self.stock.get(&item.product_id).is_none() {
                return Err(CoreError::not_found("Product", &item.product_id));
            }
        }

        let obligation = self.obligations.create(
            ObligationKind::Sale,
            customer_name,
            cart.line_items(),
            total,
            paid,
            due_date,
            None,
        )?;

        // Cannot fail: products resolved above, quantities positive
        for item in &cart.items {
            self.stock.adjust(
                &item.product_id,
                StockAdjustmentKind::Subtract,
                item.quantity,
                &format!("sale {}", obligation.id),
            )?;
        }

        Ok(obligation)
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Records a stock purchase from a supplier.
    ///
    /// `total = purchase_price × quantity`. The bought quantity is added
    /// to stock in the same operation - the purchase and the intake are
    /// one fact, not two screens.
    pub fn record_purchase(
        &mut self,
        product_id: &str,
        quantity: i64,
        supplier_name: &str,
        amount_paid: Money,
        due_date: Option<DateTime<Utc>>,
    ) -> CoreResult<Obligation> {
        validate_line_quantity(quantity)?;
        validate_name("supplier name", supplier_name)?;

        let product = self
            .stock
            .get(product_id)
            .ok_or_else(|| CoreError::not_found("Product", product_id))?
            .clone();

        let total = product.purchase_price().multiply_quantity(quantity);
        Self::check_payment_bounds(amount_paid, total)?;

        let line = LineItem::new(
            product.id.clone(),
            product.name.clone(),
            quantity,
            product.purchase_price(),
        )?;

        let obligation = self.obligations.create(
            ObligationKind::Purchase,
            supplier_name,
            vec![line],
            total,
            amount_paid,
            due_date,
            None,
        )?;

        self.stock.adjust(
            product_id,
            StockAdjustmentKind::Add,
            quantity,
            &format!("purchase {}", obligation.id),
        )?;

        Ok(obligation)
    }

    // =========================================================================
    // Debts
    // =========================================================================

    /// Records a standalone customer debt (money owed to the shop).
    pub fn record_customer_debt(
        &mut self,
        customer_name: &str,
        amount: Money,
        initial_paid: Money,
        due_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> CoreResult<Obligation> {
        self.obligations.create(
            ObligationKind::CustomerDebt,
            customer_name,
            Vec::new(),
            amount,
            initial_paid,
            due_date,
            notes,
        )
    }

    /// Records a standalone supplier debt (money the shop owes).
    pub fn record_supplier_debt(
        &mut self,
        supplier_name: &str,
        amount: Money,
        initial_paid: Money,
        due_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> CoreResult<Obligation> {
        self.obligations.create(
            ObligationKind::SupplierDebt,
            supplier_name,
            Vec::new(),
            amount,
            initial_paid,
            due_date,
            notes,
        )
    }

    // =========================================================================
    // Payroll
    // =========================================================================

    /// Records a payroll run for one employee.
    ///
    /// `total = base_salary + bonus - deduction`, validated non-negative.
    /// Later corrections go through
    /// [`ObligationLedger::adjust_total`](crate::obligation::ObligationLedger::adjust_total).
    pub fn record_payroll(
        &mut self,
        employee_name: &str,
        base_salary: Money,
        bonus: Money,
        deduction: Money,
        amount_paid: Money,
        due_date: Option<DateTime<Utc>>,
    ) -> CoreResult<Obligation> {
        validate_non_negative_amount("base salary", base_salary)?;
        validate_non_negative_amount("bonus", bonus)?;
        validate_non_negative_amount("deduction", deduction)?;

        let total = base_salary + bonus - deduction;
        if total.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "payroll total".to_string(),
            }
            .into());
        }
        Self::check_payment_bounds(amount_paid, total)?;

        self.obligations.create(
            ObligationKind::PayrollDeduction,
            employee_name,
            Vec::new(),
            total,
            amount_paid,
            due_date,
            None,
        )
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Checks `0 <= paid <= total`.
    fn check_payment_bounds(paid: Money, total: Money) -> CoreResult<()> {
        validate_non_negative_amount("amount paid", paid)?;
        if paid > total {
            return Err(ValidationError::OutOfRange {
                field: "amount paid".to_string(),
                min: 0,
                max: total.cents(),
            }
            .into());
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
