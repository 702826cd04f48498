//! # Error Types
//!
//! Domain-specific error types for tripus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tripus-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures (InvalidInput)       │
//! │                                                                         │
//! │  tripus-store errors                                                   │
//! │  └── StoreError       - Snapshot cache failures                        │
//! │                                                                         │
//! │  tripus-notify errors                                                  │
//! │  └── NotifyError      - Email collaborator failures                    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is raised BEFORE any state is touched: operations that
//! return `Err` leave the session snapshot exactly as it was.
//!
//! An empty sales ledger is deliberately NOT an error. Forecasts over an
//! empty ledger return zero revenue instead of dividing by zero.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product code is not in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with this code already exists.
    #[error("Product code '{0}' already exists")]
    DuplicateProduct(String),

    /// Customer id is not on the roster.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Credit transaction id is unknown.
    #[error("Credit transaction not found: {0}")]
    CreditTransactionNotFound(String),

    /// Insufficient stock to complete the sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { code: "P001", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 items available"
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Checkout or credit grant attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The cart's stock has already been committed by another checkout path.
    ///
    /// ## When This Occurs
    /// - A cash checkout and a credit grant are both attempted on the
    ///   same cart
    /// - A checkout is retried after it already succeeded
    #[error("Cart {0} has already been checked out")]
    CartAlreadyCommitted(String),

    /// The customer's account does not allow store credit.
    #[error("Customer {0} is not allowed store credit")]
    CreditNotAllowed(String),

    /// Cash received does not cover the bill.
    #[error("Amount received {received} is less than total {total}")]
    InsufficientTender { received: String, total: String },

    /// A reminder was requested but neither the transaction nor the
    /// customer has an email address.
    #[error("No email available for credit transaction {transaction_id}")]
    NoEmailAvailable { transaction_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Reported to the caller as `INVALID_INPUT`; no state is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., email without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InsufficientStock {
            code: "P001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for P001: available 3, requested 5"
        );

        let err = CoreError::NoEmailAvailable {
            transaction_id: "CR-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No email available for credit transaction CR-1"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
