//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐    ┌────────────┐  │
//! │  │  Empty   │────►│ In Cart  │────►│ checkout /   │───►│ Committed  │  │
//! │  │  Cart    │     │          │     │ grant_credit │    │ (new cart) │  │
//! │  └──────────┘     └──────────┘     └──────────────┘    └────────────┘  │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   update_cart_item                                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ───────────────────► (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock checks use the session's current stock; the cart itself never
//! touches inventory.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, SessionState};
use tripus_core::{Cart, CartItem, CartTotals, Product};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: String,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            cart_id: cart.id.clone(),
            items: cart.items.clone(),
            totals: cart.totals(),
        }
    }
}

pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: added as a new line at the current price
/// - Resulting quantity above stock: `INSUFFICIENT_STOCK`
pub fn add_to_cart(
    session: &SessionState,
    cart: &CartState,
    code: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(code = %code, quantity = %quantity, "add_to_cart command");

    let product = lookup(session, code)?;
    cart.with_cart_mut(|c| {
        c.add_item(&product, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Sets the quantity of a line. Quantity ≤ 0 removes it.
pub fn update_cart_item(
    session: &SessionState,
    cart: &CartState,
    code: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(code = %code, quantity = %quantity, "update_cart_item command");

    let product = lookup(session, code)?;
    cart.with_cart_mut(|c| {
        c.update_quantity(&product, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

pub fn remove_from_cart(cart: &CartState, code: &str) -> Result<CartResponse, ApiError> {
    debug!(code = %code, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(code)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Clears all items. The cart gets a new id.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

fn lookup(session: &SessionState, code: &str) -> Result<Product, ApiError> {
    session
        .with_session(|s| s.product(code).cloned())
        .ok_or_else(|| ApiError::not_found("Product", code))
}
