//! # tripus-core: Pure Business Logic for TriPUS
//!
//! This crate is the **heart** of TriPUS. It contains the forecast engine,
//! the credit ledger and the checkout session as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TriPUS Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/pos (commands + CLI)                       │   │
//! │  │    checkout, grant_credit, product_forecast, export_csv ...    │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼────────────────────┐  │
//! │  │  ★ tripus-core (THIS CRATE) ★   │  │ tripus-store / tripus-notify│  │
//! │  │                                 │  │  SQLite cache, email client │  │
//! │  │  forecast   recommend  credit   │  └─────────────────────────────┘  │
//! │  │  session    cart       analytics│                                    │
//! │  │  generator  export     team     │                                    │
//! │  │                                 │                                    │
//! │  │  NO I/O • NO CLOCK • NO LOGGING │                                    │
//! │  └─────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SalesRecord, Customer, CreditTransaction, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`random`] - Injectable random sources
//! - [`cart`] - Shopping cart
//! - [`forecast`] - Revenue forecast and per-product demand series
//! - [`recommend`] - Natural-language recommendations
//! - [`credit`] - Credit ledger bookkeeping
//! - [`session`] - Immutable session snapshot (checkout, credit, inventory)
//! - [`analytics`] - Dashboard aggregations
//! - [`export`] - Transactions CSV
//! - [`generator`] - Synthetic demo data
//! - [`team`] - Team roster and reminder messages
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: "today" and randomness are always passed in
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tripus_core::forecast::product_series;
//! use tripus_core::generator::default_products;
//! use tripus_core::random::FixedRandom;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let series = product_series(&default_products(), &[], today, &mut FixedRandom::midpoint());
//!
//! assert_eq!(series.len(), 5);
//! assert!(series.iter().all(|s| s.historical.len() == 7 && s.predicted.len() == 7));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod credit;
pub mod error;
pub mod export;
pub mod forecast;
pub mod generator;
pub mod money;
pub mod random;
pub mod recommend;
pub mod session;
pub mod team;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tripus_core::Money` instead of
// `use tripus_core::money::Money`

pub use cart::{Cart, CartItem, CartTotals};
pub use credit::{CreditGrant, CreditLedger, ReminderRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use forecast::ProductForecastSeries;
pub use money::Money;
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use session::{history_from_bills, CheckoutReceipt, CustomerDetails, Session, Tender};
pub use team::TeamMessage;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days between a credit grant and its due date.
pub const CREDIT_TERM_DAYS: i64 = 30;

/// Customer name recorded when none is typed at checkout.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Default horizon of the aggregate revenue forecast (days).
pub const DEFAULT_FORECAST_HORIZON: usize = 30;

/// Maximum unique lines in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
