//! # Reports
//!
//! Pure derivation functions over the ledger collections.
//!
//! ## Why Derivation Functions?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  The source recomputed dashboard stats inline on every render,      │
//! │  each page with its own copy of the arithmetic.                     │
//! │                                                                     │
//! │  Here the same numbers come from one set of pure functions:         │
//! │                                                                     │
//! │    &[Obligation] ──► obligation_summary ──► totals & counts         │
//! │    &[Obligation] ──► overdue / due_soon ──► filtered views          │
//! │    &[Product]    ──► stock_summary      ──► counts & valuation      │
//! │                                                                     │
//! │  No UI framework, no clock except the `now` you pass in, no         │
//! │  state. Testable with plain vectors.                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::obligation::ObligationLedger;
use crate::stock::StockLedger;
use crate::types::{Obligation, ObligationStatus, Product, StockStatus};

// =============================================================================
// Obligation Derivations
// =============================================================================

/// Aggregate view over a set of obligations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationSummary {
    pub count: usize,
    pub total_cents: i64,
    pub paid_cents: i64,
    pub pending_cents: i64,
    pub overdue_count: usize,
    pub due_soon_count: usize,
}

/// Summarizes obligations: totals plus overdue/due-soon counts.
pub fn obligation_summary<'a>(
    obligations: impl IntoIterator<Item = &'a Obligation>,
    now: DateTime<Utc>,
) -> ObligationSummary {
    let mut summary = ObligationSummary::default();

    for obligation in obligations {
        summary.count += 1;
        summary.total_cents += obligation.total_cents;
        summary.paid_cents += obligation.paid_cents;
        summary.pending_cents += obligation.pending_cents;

        match obligation.derive_status(now) {
            ObligationStatus::Overdue => summary.overdue_count += 1,
            ObligationStatus::DueSoon => summary.due_soon_count += 1,
            _ => {}
        }
    }

    summary
}

/// Obligations past their due date with money still pending.
pub fn overdue<'a>(
    obligations: impl IntoIterator<Item = &'a Obligation>,
    now: DateTime<Utc>,
) -> Vec<&'a Obligation> {
    obligations
        .into_iter()
        .filter(|o| o.derive_status(now) == ObligationStatus::Overdue)
        .collect()
}

/// Obligations falling due within the next 7 days.
pub fn due_soon<'a>(
    obligations: impl IntoIterator<Item = &'a Obligation>,
    now: DateTime<Utc>,
) -> Vec<&'a Obligation> {
    obligations
        .into_iter()
        .filter(|o| o.derive_status(now) == ObligationStatus::DueSoon)
        .collect()
}

/// Pending money owed TO the shop (sales, customer debts).
pub fn receivable_pending<'a>(obligations: impl IntoIterator<Item = &'a Obligation>) -> Money {
    Money::from_cents(
        obligations
            .into_iter()
            .filter(|o| o.kind.is_receivable())
            .map(|o| o.pending_cents)
            .sum(),
    )
}

/// Pending money owed BY the shop (purchases, supplier debts, payroll).
pub fn payable_pending<'a>(obligations: impl IntoIterator<Item = &'a Obligation>) -> Money {
    Money::from_cents(
        obligations
            .into_iter()
            .filter(|o| o.kind.is_payable())
            .map(|o| o.pending_cents)
            .sum(),
    )
}

// =============================================================================
// Stock Derivations
// =============================================================================

/// Aggregate view over the product catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub product_count: usize,
    pub total_units: i64,
    pub out_of_stock_count: usize,
    pub low_stock_count: usize,
    /// Shelf value at purchase price.
    pub stock_value_cents: i64,
}

/// Summarizes the catalog: counts and valuation at purchase price.
pub fn stock_summary<'a>(products: impl IntoIterator<Item = &'a Product>) -> StockSummary {
    let mut summary = StockSummary::default();

    for product in products {
        summary.product_count += 1;
        summary.total_units += product.stock_level;
        summary.stock_value_cents += product
            .purchase_price()
            .multiply_quantity(product.stock_level)
            .cents();

        match product.stock_status() {
            StockStatus::OutOfStock => summary.out_of_stock_count += 1,
            StockStatus::LowStock => summary.low_stock_count += 1,
            StockStatus::InStock => {}
        }
    }

    summary
}

/// Products that are low or out of stock, in the given order.
pub fn needs_restock<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|p| p.stock_status() != StockStatus::InStock)
        .collect()
}

// =============================================================================
// Dashboard Report
// =============================================================================

/// The full dashboard snapshot, serializable for the JSON export path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub obligations: ObligationSummary,
    pub stock: StockSummary,
    pub receivable_pending_cents: i64,
    pub payable_pending_cents: i64,
}

impl DashboardReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derives the full dashboard snapshot from the two ledgers.
pub fn dashboard_report(
    obligations: &ObligationLedger,
    stock: &StockLedger,
    now: DateTime<Utc>,
) -> DashboardReport {
    DashboardReport {
        generated_at: now,
        obligations: obligation_summary(obligations.list(), now),
        stock: stock_summary(stock.list()),
        receivable_pending_cents: receivable_pending(obligations.list()).cents(),
        payable_pending_cents: payable_pending(obligations.list()).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
