//! # Cart
//!
//! The in-progress shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Method                  Cart Change          │
//! │  ─────────                 ──────                  ───────────          │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ───────────► push / qty += n      │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ────► qty = n (≤0 removes) │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ────────► items.remove(i)      │
//! │                                                                         │
//! │  Checkout done ──────────► clear() ──────────────► empty, NEW cart id   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is checked against the product passed in at add/update time, and
//! again by the session when the sale is committed (the cart may be stale).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_cart_size, validate_quantity};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// Name and price are frozen when the product is added, so a later price
/// edit does not change what the customer was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product code (unique within the cart).
    pub code: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CartItem {
    /// Creates a line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `code` (adding the same product increases quantity)
/// - Every quantity is > 0
/// - A cart id is committed by at most one checkout path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Identity used to commit the sale exactly once.
    pub id: String,
    pub items: Vec<CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart with a fresh id.
    pub fn new() -> Self {
        Cart::with_id(Uuid::new_v4().to_string())
    }

    /// Creates an empty cart with a known id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Cart {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// Adds a product or increases its quantity.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not in 1..=999 or the cart is full
    /// - `InsufficientStock` if the resulting quantity exceeds `product.stock`
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let in_cart = self.quantity_of(&product.code);
        let requested = in_cart + quantity;
        validate_quantity(requested)?;

        if !product.can_sell(requested) {
            return Err(CoreError::InsufficientStock {
                code: product.code.clone(),
                available: product.stock,
                requested,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.code == product.code) {
            item.quantity = requested;
            return Ok(());
        }

        validate_cart_size(self.items.len())?;
        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line. A quantity ≤ 0 removes it.
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(&product.code);
        }

        validate_quantity(quantity)?;

        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                code: product.code.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        match self.items.iter_mut().find(|i| i.code == product.code) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ProductNotFound(product.code.clone())),
        }
    }

    /// Removes a line by product code.
    pub fn remove_item(&mut self, code: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.code != code);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(code.to_string()))
        } else {
            Ok(())
        }
    }

    /// Empties the cart and gives it a new identity.
    pub fn clear(&mut self) {
        *self = Cart::new();
    }

    /// Quantity of `code` currently in the cart (0 if absent).
    pub fn quantity_of(&self, code: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.code == code)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ unit price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary for API responses.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            total_cents: self.total().cents(),
        }
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    #[ts(type = "number")]
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
