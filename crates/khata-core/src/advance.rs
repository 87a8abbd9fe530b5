//! # Advance Book
//!
//! Employee salary advances and their FIFO repayment.
//!
//! ## FIFO Deduction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              deduct(employee, Rs 150)                               │
//! │                                                                     │
//! │  Advances (oldest first):                                           │
//! │    #1  Jan 05   remaining Rs 100  ──► Rs   0   (fully consumed)     │
//! │    #2  Feb 12   remaining Rs 100  ──► Rs  50   (partially)          │
//! │                                                                     │
//! │  Total deducted: Rs 150                                             │
//! │                                                                     │
//! │  A deduction larger than the employee's total outstanding           │
//! │  balance is rejected up front; the walk never under-deducts         │
//! │  silently.                                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::AdvancePayment;
use crate::validation::{validate_name, validate_payment_amount, validate_reason};

/// All advance payments, across employees.
///
/// Stored flat; per-employee views are filtered on demand. Remaining
/// balances only shrink, and only through [`deduct`](AdvanceBook::deduct).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvanceBook {
    advances: Vec<AdvancePayment>,
}

impl AdvanceBook {
    /// Creates an empty advance book.
    pub fn new() -> Self {
        AdvanceBook {
            advances: Vec::new(),
        }
    }

    /// Rebuilds from persisted advances.
    pub fn from_parts(advances: Vec<AdvancePayment>) -> Self {
        AdvanceBook { advances }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a new advance handed to an employee.
    ///
    /// The remaining balance starts equal to the amount.
    pub fn record_advance(
        &mut self,
        employee_id: &str,
        amount: Money,
        reason: &str,
        date: DateTime<Utc>,
    ) -> CoreResult<AdvancePayment> {
        validate_name("employee id", employee_id)?;
        validate_payment_amount(amount)?;
        validate_reason(reason)?;

        let advance = AdvancePayment {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.trim().to_string(),
            amount_cents: amount.cents(),
            remaining_cents: amount.cents(),
            date,
            reason: reason.trim().to_string(),
        };

        self.advances.push(advance.clone());
        Ok(advance)
    }

    /// Deducts an amount from an employee's outstanding advances,
    /// oldest first.
    ///
    /// ## Rules
    /// - `amount > 0`
    /// - `amount <= outstanding(employee)` - rejected up front, nothing
    ///   is mutated on failure
    ///
    /// ## Returns
    /// The amount deducted (always equal to `amount` on success).
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use khata_core::advance::AdvanceBook;
    /// use khata_core::money::Money;
    ///
    /// let mut book = AdvanceBook::new();
    /// book.record_advance("emp-1", Money::from_cents(100), "groceries", Utc::now())
    ///     .unwrap();
    /// book.record_advance("emp-1", Money::from_cents(100), "school fees", Utc::now())
    ///     .unwrap();
    ///
    /// let deducted = book.deduct("emp-1", Money::from_cents(150)).unwrap();
    /// assert_eq!(deducted.cents(), 150);
    /// assert_eq!(book.outstanding("emp-1").cents(), 50);
    /// ```
    pub fn deduct(&mut self, employee_id: &str, amount: Money) -> CoreResult<Money> {
        validate_payment_amount(amount)?;

        let outstanding = self.outstanding(employee_id);
        if amount > outstanding {
            return Err(ValidationError::OutOfRange {
                field: "deduction amount".to_string(),
                min: 1,
                max: outstanding.cents(),
            }
            .into());
        }

        // Oldest first; stable sort keeps recording order for same-day
        // advances
        let mut order: Vec<usize> = (0..self.advances.len())
            .filter(|&i| {
                self.advances[i].employee_id == employee_id
                    && self.advances[i].remaining_cents > 0
            })
            .collect();
        order.sort_by_key(|&i| self.advances[i].date);

        let mut left = amount.cents();
        for i in order {
            if left == 0 {
                break;
            }
            let advance = &mut self.advances[i];
            let take = left.min(advance.remaining_cents);
            advance.remaining_cents -= take;
            left -= take;

            debug_assert!(advance.remaining_cents >= 0);
            debug_assert!(advance.remaining_cents <= advance.amount_cents);
        }

        debug_assert_eq!(left, 0);
        Ok(amount)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Total outstanding advance balance for an employee.
    pub fn outstanding(&self, employee_id: &str) -> Money {
        let cents = self
            .advances
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .map(|a| a.remaining_cents)
            .sum();
        Money::from_cents(cents)
    }

    /// An employee's advances, oldest first.
    pub fn advances_for(&self, employee_id: &str) -> Vec<&AdvancePayment> {
        let mut advances: Vec<&AdvancePayment> = self
            .advances
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect();
        advances.sort_by_key(|a| a.date);
        advances
    }

    /// All advances, in recording order.
    pub fn list(&self) -> &[AdvancePayment] {
        &self.advances
    }

    /// Number of recorded advances.
    pub fn len(&self) -> usize {
        self.advances.len()
    }

    /// Checks if no advances are recorded.
    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
