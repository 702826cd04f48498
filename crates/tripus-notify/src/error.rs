//! # Notify Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Notify Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Delivery     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  DeliveryFailed │  │  Serialization          │ │
//! │  │  ConfigLoad     │  │  Rejected       │  │                         │ │
//! │  │  NotConfigured  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed send never rolls back the sale or credit grant that triggered it;
//! callers surface the error as a notice.

use thiserror::Error;

/// Result type alias for notify operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid notify configuration.
    #[error("Invalid email configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Receipts need an API key and a sender address.
    #[error("Email settings are incomplete: API key and sender email are required")]
    NotConfigured,

    // =========================================================================
    // Delivery Errors
    // =========================================================================
    /// The endpoint could not be reached (connect error, timeout).
    #[error("Email delivery failed: {0}")]
    DeliveryFailed(String),

    /// The endpoint answered but refused the message.
    #[error("Email rejected (HTTP {status}): {reason}")]
    Rejected { status: u16, reason: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NotifyError::DeliveryFailed(format!("request timed out: {err}"))
        } else {
            NotifyError::DeliveryFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(err: serde_json::Error) -> Self {
        NotifyError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for NotifyError {
    fn from(err: std::io::Error) -> Self {
        NotifyError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for NotifyError {
    fn from(err: toml::de::Error) -> Self {
        NotifyError::ConfigLoadFailed(err.to_string())
    }
}
