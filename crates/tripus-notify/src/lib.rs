//! # tripus-notify: Email Collaborator Client for TriPUS
//!
//! Receipts, credit invoices, credit reminders and team messages are all
//! delivered by an external send-email endpoint. This crate owns the request
//! contract and the HTTP client; it knows nothing about how mail is actually
//! delivered.
//!
//! ## Module Organization
//!
//! - [`config`] - Endpoint URL and timeout (TOML + env)
//! - [`message`] - `EmailRequest` wire contract
//! - [`transport`] - `EmailTransport` trait, HTTP and recording transports
//! - [`mailer`] - Domain-level send operations
//! - [`error`] - Notify error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tripus_notify::{HttpEmailTransport, Mailer, NotifyConfig};
//!
//! let config = NotifyConfig::load_or_default(None);
//! let mailer = Mailer::new(Arc::new(HttpEmailTransport::new(&config)?));
//! mailer.send_reminder(&reminder).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod mailer;
pub mod message;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::NotifyConfig;
pub use error::{NotifyError, NotifyResult};
pub use mailer::{BatchReport, Mailer};
pub use message::{EmailRequest, ReceiptLine};
pub use transport::{EmailTransport, HttpEmailTransport, RecordingTransport};
