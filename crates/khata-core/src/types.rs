//! # Domain Types
//!
//! Core domain types used throughout Khata.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │   Obligation    │   │  ReturnRequest  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │   │
//! │  │  sku (business) │   │  kind (tagged)  │   │  kind           │   │
//! │  │  stock_level    │   │  total_cents    │   │  original id    │   │
//! │  │  min_stock      │   │  paid_cents     │   │  status         │   │
//! │  │  prices (cents) │   │  pending_cents  │   │  processed_by   │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    LineItem     │   │ AdvancePayment  │   │ StockAdjustment │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  quantity > 0   │   │  amount_cents   │   │  kind           │   │
//! │  │  unit × qty     │   │  remaining      │   │  reason         │   │
//! │  │  == total       │   │  (FIFO order)   │   │  prev → new     │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Obligation Abstraction
//! Sales, purchases, customer/supplier debts, and payroll entries are all
//! the same shape: someone owes someone a total, part of it is paid, the
//! rest is pending. One tagged type replaces five duck-typed record
//! shapes, and one invariant (`paid + pending == total`) covers them all.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::DUE_SOON_DAYS;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Free-form category label ("Beverages", "Dairy", ...).
    pub category: String,

    /// Units currently on the shelf. Never negative.
    pub stock_level: i64,

    /// Reorder threshold: at or below this level the product is LowStock.
    pub min_stock: i64,

    /// What the shop pays per unit, in cents.
    pub purchase_price_cents: i64,

    /// What the customer pays per unit, in cents.
    pub sale_price_cents: i64,

    /// When stock was last added. Only Add adjustments update this.
    pub last_restocked: Option<DateTime<Utc>>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Derives the stock status from the current level.
    ///
    /// ## Rules
    /// - `OutOfStock` when `stock_level == 0`
    /// - `LowStock` when `0 < stock_level <= min_stock`
    /// - `InStock` otherwise
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_level == 0 {
            StockStatus::OutOfStock
        } else if self.stock_level <= self.min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Derived stock status. Never stored; always computed from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

// =============================================================================
// Stock Adjustments
// =============================================================================

/// How a stock adjustment changes the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustmentKind {
    /// `new = current + quantity`. Updates `last_restocked`.
    Add,
    /// `new = max(0, current - quantity)`. Clamps at zero.
    Subtract,
    /// `new = max(0, quantity)`.
    Set,
}

/// Audit record of a single stock adjustment.
///
/// The adjustment trail answers "why is the shelf count what it is" -
/// damage write-offs, recounts, purchase intake, and sale deductions
/// all land here with their reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub id: String,
    pub product_id: String,
    pub kind: StockAdjustmentKind,
    pub quantity: i64,
    pub reason: String,
    pub previous_level: i64,
    pub new_level: i64,
    pub adjusted_at: DateTime<Utc>,
}

// =============================================================================
// Obligations
// =============================================================================

/// What flavor of total/paid/pending record this is.
///
/// An explicit discriminant instead of probing record shapes: the source
/// system told customer debts from supplier debts by checking which name
/// field a record happened to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// Customer owes the shop for goods sold.
    Sale,
    /// Shop owes a supplier for goods bought.
    Purchase,
    /// Customer owes the shop (standalone debt, not tied to a sale).
    CustomerDebt,
    /// Shop owes a supplier (standalone debt).
    SupplierDebt,
    /// Payroll entry: salary plus bonus minus deductions.
    PayrollDeduction,
}

impl ObligationKind {
    /// Money flowing toward the shop (counterparty pays us).
    pub fn is_receivable(&self) -> bool {
        matches!(self, ObligationKind::Sale | ObligationKind::CustomerDebt)
    }

    /// Money flowing out of the shop (we pay the counterparty).
    pub fn is_payable(&self) -> bool {
        !self.is_receivable()
    }
}

/// Derived payment status of an obligation.
///
/// Never stored alongside the amounts - a stored status can desync from
/// the balance that defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    /// Nothing pending.
    Paid,
    /// Nothing paid yet.
    Unpaid,
    /// Some paid, some pending.
    Partial,
    /// Pending amount past its due date.
    Overdue,
    /// Pending amount due within the next 7 days.
    DueSoon,
}

/// A generic total/paid/pending record.
///
/// Unifies Sale, Purchase, CustomerDebt, SupplierDebt and payroll
/// entries. Each obligation independently owns its own paid/pending
/// pair; there is no shared mutable state between records.
///
/// ## Invariants
/// - `paid_cents + pending_cents == total_cents` at all times
/// - `paid_cents >= 0`, `pending_cents >= 0`
///
/// These hold after construction and after every mutation the
/// [`ObligationLedger`](crate::obligation::ObligationLedger) applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obligation {
    pub id: String,
    pub kind: ObligationKind,
    /// Customer, supplier, or employee name.
    pub counterparty_name: String,
    pub total_cents: i64,
    pub paid_cents: i64,
    pub pending_cents: i64,
    /// When the pending amount falls due, if a due date was agreed.
    pub due_date: Option<DateTime<Utc>>,
    /// Line items for sales and purchases. Empty for bare debts and
    /// payroll entries.
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Obligation {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the paid amount as Money.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_cents(self.paid_cents)
    }

    /// Returns the pending amount as Money.
    #[inline]
    pub fn pending(&self) -> Money {
        Money::from_cents(self.pending_cents)
    }

    /// Checks if nothing is pending.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.pending_cents == 0
    }

    /// Derives the payment status at a given instant.
    ///
    /// ## Precedence
    /// 1. `Paid` - settled records are never overdue
    /// 2. `Overdue` - due date passed with money still pending
    /// 3. `DueSoon` - due within [`DUE_SOON_DAYS`]
    /// 4. `Unpaid` / `Partial` by paid amount
    pub fn derive_status(&self, now: DateTime<Utc>) -> ObligationStatus {
        if self.pending_cents == 0 {
            return ObligationStatus::Paid;
        }

        if let Some(due) = self.due_date {
            if due < now {
                return ObligationStatus::Overdue;
            }
            if due - now <= Duration::days(DUE_SOON_DAYS) {
                return ObligationStatus::DueSoon;
            }
        }

        if self.paid_cents == 0 {
            ObligationStatus::Unpaid
        } else {
            ObligationStatus::Partial
        }
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A priced line in a sale or purchase.
///
/// Product name and unit price are snapshots taken when the line was
/// created; later catalog edits do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Always `unit_price_cents * quantity`; enforced by construction.
    pub total_cents: i64,
}

impl LineItem {
    /// Creates a line item, computing the total from unit price and
    /// quantity.
    ///
    /// Fails with `MustBePositive` when `quantity <= 0`.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<Self> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        Ok(LineItem {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price_cents: unit_price.cents(),
            total_cents: unit_price.multiply_quantity(quantity).cents(),
        })
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Payment Terms
// =============================================================================

/// How a recorded transaction is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Paid in full at recording time.
    Full,
    /// Partially paid now; the rest falls due on a date that must be
    /// supplied alongside.
    Installment,
}

// =============================================================================
// Returns
// =============================================================================

/// Which direction a return reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// Customer brings goods back; reverses a Sale.
    SaleReturn,
    /// Shop sends goods back; reverses a Purchase.
    PurchaseReturn,
}

impl ReturnKind {
    /// The obligation kind a return of this kind must reference.
    pub fn original_kind(&self) -> ObligationKind {
        match self {
            ReturnKind::SaleReturn => ObligationKind::Sale,
            ReturnKind::PurchaseReturn => ObligationKind::Purchase,
        }
    }
}

/// Approval state of a return request.
///
/// `Pending` transitions exactly once, to `Approved` or `Rejected`.
/// Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReturnStatus {
    /// Lowercase label for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
        }
    }
}

/// A request to reverse a sale or purchase.
///
/// Copies the original obligation's counterparty, total, and line items
/// verbatim: only full-order returns are supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub id: String,
    pub kind: ReturnKind,
    pub original_obligation_id: String,
    pub counterparty_name: String,
    pub amount_cents: i64,
    pub items: Vec<LineItem>,
    pub reason: String,
    pub status: ReturnStatus,
    /// Who approved or rejected the request.
    pub processed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl ReturnRequest {
    /// Returns the reversal amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Advance Payments
// =============================================================================

/// A salary advance handed to an employee.
///
/// ## Invariant
/// `0 <= remaining_cents <= amount_cents`. The remaining balance only
/// shrinks, and only through FIFO deduction in
/// [`AdvanceBook`](crate::advance::AdvanceBook).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancePayment {
    pub id: String,
    pub employee_id: String,
    pub amount_cents: i64,
    pub remaining_cents: i64,
    /// When the advance was handed out. Deduction order key.
    pub date: DateTime<Utc>,
    pub reason: String,
}

impl AdvancePayment {
    /// Returns the original advance amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn remaining(&self) -> Money {
        Money::from_cents(self.remaining_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
