//! # Obligation Ledger
//!
//! The generic total/paid/pending ledger behind sales, purchases,
//! debts, and payroll entries.
//!
//! ## The Balance Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │            paid + pending == total, always                          │
//! │                                                                     │
//! │  create(total=300, initial_paid=100)                                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Obligation { total: 300, paid: 100, pending: 200 }                 │
//! │       │                                                             │
//! │  apply_payment(200)                                                 │
//! │       ▼                                                             │
//! │  Obligation { total: 300, paid: 300, pending: 0 }  → Paid           │
//! │       │                                                             │
//! │  apply_payment(1)                                                   │
//! │       ▼                                                             │
//! │  ValidationError (exceeds pending) - obligation unchanged           │
//! │                                                                     │
//! │  The bound is enforced HERE, once, not re-implemented per dialog.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, Obligation, ObligationKind};
use crate::validation::{validate_name, validate_non_negative_amount, validate_payment_amount};

/// The collection of obligations with enforced balance invariants.
///
/// Each obligation independently owns its paid/pending pair. Every
/// mutation re-establishes `paid + pending == total` before returning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObligationLedger {
    obligations: HashMap<String, Obligation>,
}

impl ObligationLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        ObligationLedger {
            obligations: HashMap::new(),
        }
    }

    /// Rebuilds a ledger from persisted obligations.
    pub fn from_parts(obligations: Vec<Obligation>) -> Self {
        ObligationLedger {
            obligations: obligations.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a new obligation.
    ///
    /// ## Validation
    /// - Counterparty name must be non-empty
    /// - `total >= 0`, `initial_paid >= 0`
    /// - `initial_paid <= total`
    ///
    /// On success `pending = total - initial_paid`.
    ///
    /// ## Returns
    /// A clone of the created obligation (the ledger keeps ownership).
    pub fn create(
        &mut self,
        kind: ObligationKind,
        counterparty_name: &str,
        items: Vec<LineItem>,
        total: Money,
        initial_paid: Money,
        due_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> CoreResult<Obligation> {
        validate_name("counterparty name", counterparty_name)?;
        validate_non_negative_amount("total", total)?;
        validate_non_negative_amount("initial payment", initial_paid)?;

        if initial_paid > total {
            return Err(ValidationError::OutOfRange {
                field: "initial payment".to_string(),
                min: 0,
                max: total.cents(),
            }
            .into());
        }

        let now = Utc::now();
        let obligation = Obligation {
            id: Uuid::new_v4().to_string(),
            kind,
            counterparty_name: counterparty_name.trim().to_string(),
            total_cents: total.cents(),
            paid_cents: initial_paid.cents(),
            pending_cents: (total - initial_paid).cents(),
            due_date,
            items,
            notes,
            created_at: now,
            updated_at: now,
        };

        debug_assert_eq!(
            obligation.paid_cents + obligation.pending_cents,
            obligation.total_cents
        );

        self.obligations
            .insert(obligation.id.clone(), obligation.clone());
        Ok(obligation)
    }

    /// Applies a payment against an obligation's pending amount.
    ///
    /// ## Validation
    /// - `amount > 0`
    /// - `amount <= pending` - overpayment is rejected, not truncated
    ///
    /// On failure the obligation is left untouched. On success
    /// `paid += amount`, `pending -= amount`.
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::money::Money;
    /// use khata_core::obligation::ObligationLedger;
    /// use khata_core::types::ObligationKind;
    ///
    /// let mut ledger = ObligationLedger::new();
    /// let ob = ledger
    ///     .create(ObligationKind::CustomerDebt, "Bob", Vec::new(),
    ///             Money::from_cents(30_000), Money::from_cents(10_000),
    ///             None, None)
    ///     .unwrap();
    ///
    /// let ob = ledger.apply_payment(&ob.id, Money::from_cents(20_000)).unwrap();
    /// assert_eq!(ob.pending_cents, 0);
    ///
    /// // Paying against a settled obligation fails
    /// assert!(ledger.apply_payment(&ob.id, Money::from_cents(1)).is_err());
    /// ```
    pub fn apply_payment(&mut self, obligation_id: &str, amount: Money) -> CoreResult<Obligation> {
        validate_payment_amount(amount)?;

        let obligation = self
            .obligations
            .get_mut(obligation_id)
            .ok_or_else(|| CoreError::not_found("Obligation", obligation_id))?;

        if amount.cents() > obligation.pending_cents {
            return Err(ValidationError::OutOfRange {
                field: "payment amount".to_string(),
                min: 1,
                max: obligation.pending_cents,
            }
            .into());
        }

        obligation.paid_cents += amount.cents();
        obligation.pending_cents -= amount.cents();
        obligation.updated_at = Utc::now();

        debug_assert_eq!(
            obligation.paid_cents + obligation.pending_cents,
            obligation.total_cents
        );
        debug_assert!(obligation.pending_cents >= 0);

        Ok(obligation.clone())
    }

    /// Shifts an obligation's total (and therefore its pending amount)
    /// by a signed delta.
    ///
    /// Payroll uses this for post-creation corrections: a bonus raises
    /// the total and leaves more pending; a deduction lowers both.
    ///
    /// ## Validation
    /// - The resulting pending amount must not go negative (the paid
    ///   amount is history and never shrinks here)
    pub fn adjust_total(&mut self, obligation_id: &str, delta: Money) -> CoreResult<Obligation> {
        let obligation = self
            .obligations
            .get_mut(obligation_id)
            .ok_or_else(|| CoreError::not_found("Obligation", obligation_id))?;

        let new_pending = obligation.pending_cents + delta.cents();
        if new_pending < 0 {
            return Err(ValidationError::OutOfRange {
                field: "total adjustment".to_string(),
                min: -obligation.pending_cents,
                max: i64::MAX,
            }
            .into());
        }

        obligation.total_cents += delta.cents();
        obligation.pending_cents = new_pending;
        obligation.updated_at = Utc::now();

        debug_assert_eq!(
            obligation.paid_cents + obligation.pending_cents,
            obligation.total_cents
        );

        Ok(obligation.clone())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Gets an obligation by id.
    pub fn get(&self, obligation_id: &str) -> Option<&Obligation> {
        self.obligations.get(obligation_id)
    }

    /// Lists all obligations, oldest first.
    pub fn list(&self) -> Vec<&Obligation> {
        let mut all: Vec<&Obligation> = self.obligations.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    /// Lists obligations of one kind, oldest first.
    pub fn list_by_kind(&self, kind: ObligationKind) -> Vec<&Obligation> {
        self.list().into_iter().filter(|o| o.kind == kind).collect()
    }

    /// Number of obligations in the ledger.
    pub fn len(&self) -> usize {
        self.obligations.len()
    }

    /// Checks if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
