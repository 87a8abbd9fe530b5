//! # Return Processor
//!
//! Reversal obligations with an approval workflow.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Return Request Lifecycle                         │
//! │                                                                     │
//! │                    ┌──────────┐                                     │
//! │   create ────────► │ Pending  │                                     │
//! │                    └────┬─────┘                                     │
//! │              approve    │    reject                                 │
//! │            ┌────────────┴────────────┐                              │
//! │            ▼                         ▼                              │
//! │      ┌──────────┐              ┌──────────┐                         │
//! │      │ Approved │              │ Rejected │                         │
//! │      └──────────┘              └──────────┘                         │
//! │       (terminal)                (terminal)                          │
//! │                                                                     │
//! │  approve/reject on anything but Pending → InvalidState.             │
//! │  There is no path back; transitions are monotonic.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A return copies the original obligation's counterparty, total, and
//! line items verbatim: only full-order returns are supported.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::obligation::ObligationLedger;
use crate::types::{ReturnKind, ReturnRequest, ReturnStatus};
use crate::validation::{validate_name, validate_reason};

/// The collection of return requests and their approval workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnProcessor {
    requests: HashMap<String, ReturnRequest>,
}

impl ReturnProcessor {
    /// Creates an empty return processor.
    pub fn new() -> Self {
        ReturnProcessor {
            requests: HashMap::new(),
        }
    }

    /// Rebuilds from persisted requests.
    pub fn from_parts(requests: Vec<ReturnRequest>) -> Self {
        ReturnProcessor {
            requests: requests.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a pending sale return against an original sale.
    ///
    /// Fails `NotFound` if the obligation id does not resolve and
    /// `InvalidState` if it resolves to something other than a sale.
    pub fn create_sale_return(
        &mut self,
        obligations: &ObligationLedger,
        original_id: &str,
        reason: &str,
    ) -> CoreResult<ReturnRequest> {
        self.create_return(obligations, ReturnKind::SaleReturn, original_id, reason)
    }

    /// Creates a pending purchase return against an original purchase.
    pub fn create_purchase_return(
        &mut self,
        obligations: &ObligationLedger,
        original_id: &str,
        reason: &str,
    ) -> CoreResult<ReturnRequest> {
        self.create_return(obligations, ReturnKind::PurchaseReturn, original_id, reason)
    }

    fn create_return(
        &mut self,
        obligations: &ObligationLedger,
        kind: ReturnKind,
        original_id: &str,
        reason: &str,
    ) -> CoreResult<ReturnRequest> {
        validate_reason(reason)?;

        let original = obligations
            .get(original_id)
            .ok_or_else(|| CoreError::not_found("Obligation", original_id))?;

        if original.kind != kind.original_kind() {
            return Err(CoreError::invalid_state(
                "Obligation",
                original_id,
                format!("{:?}", original.kind),
                match kind {
                    ReturnKind::SaleReturn => "create a sale return",
                    ReturnKind::PurchaseReturn => "create a purchase return",
                },
            ));
        }

        // Full-order return: counterparty, amount, and lines verbatim
        let request = ReturnRequest {
            id: Uuid::new_v4().to_string(),
            kind,
            original_obligation_id: original.id.clone(),
            counterparty_name: original.counterparty_name.clone(),
            amount_cents: original.total_cents,
            items: original.items.clone(),
            reason: reason.trim().to_string(),
            status: ReturnStatus::Pending,
            processed_by: None,
            created_at: Utc::now(),
            processed_at: None,
        };

        self.requests.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Approves a pending return.
    ///
    /// Fails `InvalidState` unless the request is currently `Pending`.
    pub fn approve(&mut self, request_id: &str, processed_by: &str) -> CoreResult<ReturnRequest> {
        self.transition(request_id, processed_by, ReturnStatus::Approved, "approve")
    }

    /// Rejects a pending return.
    ///
    /// Fails `InvalidState` unless the request is currently `Pending`.
    pub fn reject(&mut self, request_id: &str, processed_by: &str) -> CoreResult<ReturnRequest> {
        self.transition(request_id, processed_by, ReturnStatus::Rejected, "reject")
    }

    fn transition(
        &mut self,
        request_id: &str,
        processed_by: &str,
        to: ReturnStatus,
        operation: &str,
    ) -> CoreResult<ReturnRequest> {
        validate_name("processed by", processed_by)?;

        let request = self
            .requests
            .get_mut(request_id)
            .ok_or_else(|| CoreError::not_found("ReturnRequest", request_id))?;

        if request.status != ReturnStatus::Pending {
            return Err(CoreError::invalid_state(
                "ReturnRequest",
                request_id,
                request.status.as_str(),
                operation,
            ));
        }

        request.status = to;
        request.processed_by = Some(processed_by.trim().to_string());
        request.processed_at = Some(Utc::now());

        Ok(request.clone())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Gets a return request by id.
    pub fn get(&self, request_id: &str) -> Option<&ReturnRequest> {
        self.requests.get(request_id)
    }

    /// Lists all return requests, oldest first.
    pub fn list(&self) -> Vec<&ReturnRequest> {
        let mut all: Vec<&ReturnRequest> = self.requests.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    /// Lists return requests in one status, oldest first.
    pub fn list_by_status(&self, status: ReturnStatus) -> Vec<&ReturnRequest> {
        self.list()
            .into_iter()
            .filter(|r| r.status == status)
            .collect()
    }

    /// Number of return requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Checks if there are no return requests.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
