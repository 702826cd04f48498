//! # Commands Module
//!
//! Every operation the UI or CLI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Inventory list/search/CRUD
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── checkout.rs   ◄─── Cash/electronic checkout + receipt
//! ├── credit.rs     ◄─── Credit grant, reminders, credit customers
//! ├── analytics.rs  ◄─── Dashboard, forecasts, recommendations, catalog
//! ├── team.rs       ◄─── Team roster and reminder emails
//! ├── export.rs     ◄─── Transactions CSV
//! └── config.rs     ◄─── App config and email sender settings
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs session + cart
//! fn add_to_cart(session: &SessionState, cart: &CartState, ...)
//!
//! // Checkout touches everything
//! async fn checkout(ctx: &AppContext, request: CheckoutRequest)
//! ```
//!
//! Every fallible command returns `Result<T, ApiError>`; responses serialize
//! to camelCase JSON.

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod credit;
pub mod export;
pub mod product;
pub mod team;
