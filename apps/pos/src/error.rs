//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in TriPUS                                 │
//! │                                                                         │
//! │  Command Function -> Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── CoreError   (validation, stock, credit rules) ──┐          │
//! │         ├── StoreError  (snapshot cache)                  ──┼─► ApiError│
//! │         └── NotifyError (email collaborator)              ──┘          │
//! │                                                                         │
//! │  Caller receives:                                                      │
//! │    { "code": "INSUFFICIENT_STOCK",                                     │
//! │      "message": "Insufficient stock for P001: available 2, ..." }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tripus_core::CoreError;
use tripus_notify::NotifyError;
use tripus_store::StoreError;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: P009"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input rejected before any state change
    InvalidInput,

    /// Duplicate product code or cart checked out twice
    Conflict,

    /// Not enough stock for the cart
    InsufficientStock,

    /// Tender does not cover the total
    PaymentError,

    /// Customer may not buy on credit
    CreditNotAllowed,

    /// No address to send a reminder to
    NoEmailAvailable,

    /// Sender settings missing
    EmailNotConfigured,

    /// The email collaborator failed
    EmailDeliveryFailed,

    /// Snapshot cache failure
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::ProductNotFound(_)
            | CoreError::CustomerNotFound(_)
            | CoreError::CreditTransactionNotFound(_) => ErrorCode::NotFound,
            CoreError::DuplicateProduct(_) | CoreError::CartAlreadyCommitted(_) => {
                ErrorCode::Conflict
            }
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::InsufficientTender { .. } => ErrorCode::PaymentError,
            CoreError::CreditNotAllowed(_) => ErrorCode::CreditNotAllowed,
            CoreError::NoEmailAvailable { .. } => ErrorCode::NoEmailAvailable,
            CoreError::EmptyCart | CoreError::Validation(_) => ErrorCode::InvalidInput,
        };
        ApiError::new(code, message)
    }
}

/// Converts snapshot cache errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt { key, .. } => ApiError::new(
                ErrorCode::StorageError,
                format!("Stored {} data is unreadable", key),
            ),
            StoreError::ConnectionFailed(_) | StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Local cache unavailable")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Cache migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local cache migration failed")
            }
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Cache query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local cache operation failed")
            }
            StoreError::Serialization(e) => ApiError::internal(e),
        }
    }
}

/// Converts email collaborator errors to API errors.
impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        let message = err.to_string();
        match err {
            NotifyError::NotConfigured => ApiError::new(ErrorCode::EmailNotConfigured, message),
            NotifyError::DeliveryFailed(_) | NotifyError::Rejected { .. } => {
                ApiError::new(ErrorCode::EmailDeliveryFailed, message)
            }
            NotifyError::InvalidConfig(_) | NotifyError::ConfigLoadFailed(_) => {
                ApiError::invalid_input(message)
            }
            NotifyError::Serialization(_) => ApiError::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
