//! # Cart State
//!
//! Holds the cart being built at the register.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action                   Command                 Cart State Change     │
//! │  ──────                   ───────                 ─────────────────     │
//! │  Pick product ───────────► add_to_cart() ───────► push / qty += n      │
//! │  Change quantity ────────► update_cart_item() ──► qty = n (≤0 removes) │
//! │  Remove line ────────────► remove_from_cart() ──► retain               │
//! │  Clear / after sale ─────► clear_cart() ────────► new empty cart + id  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A fresh id after every clear is what lets the session commit each cart
//! exactly once.

use std::sync::{Arc, Mutex};

use tripus_core::Cart;

/// Thread-safe wrapper around the current cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Copy of the cart for checkout.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    /// Clears the cart only if it is still the one that was checked out.
    pub fn clear_if(&self, cart_id: &str) {
        self.with_cart_mut(|cart| {
            if cart.id == cart_id {
                cart.clear();
            }
        })
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
