//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  khata-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger operation failures                  │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  khata-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures                       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller surfaces a message     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, id, bounds)
//! 3. Errors are enum variants, never String
//! 4. A failed operation leaves the touched entity unchanged

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger operation errors.
///
/// These errors represent business rule violations or unresolvable
/// references. They should be caught and translated to user-friendly
/// messages by the calling layer, which must not proceed with a
/// partial update.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity cannot be found.
    ///
    /// ## When This Occurs
    /// - Obligation id doesn't exist in the ledger
    /// - Product id doesn't exist in the stock ledger
    /// - Return request id doesn't resolve
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The entity is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Approving a return that is already approved or rejected
    /// - Creating a sale return against a purchase obligation
    #[error("{entity} {id} is {status}, cannot {operation}")]
    InvalidState {
        entity: String,
        id: String,
        status: String,
        operation: String,
    },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an InvalidState error.
    pub fn invalid_state(
        entity: impl Into<String>,
        id: impl Into<String>,
        status: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        CoreError::InvalidState {
            entity: entity.into(),
            id: id.into(),
            status: status.into(),
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before ledger mutations run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    ///
    /// Monetary bounds are expressed in cents.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("Obligation", "ob-123");
        assert_eq!(err.to_string(), "Obligation not found: ob-123");

        let err = CoreError::invalid_state("ReturnRequest", "ret-1", "Approved", "approve");
        assert_eq!(
            err.to_string(),
            "ReturnRequest ret-1 is Approved, cannot approve"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::OutOfRange {
            field: "payment amount".to_string(),
            min: 1,
            max: 500,
        };
        assert_eq!(err.to_string(), "payment amount must be between 1 and 500");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
