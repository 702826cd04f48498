//! # Store State
//!
//! Wraps the snapshot cache `Database` for use in commands.
//!
//! ## Persistence Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutating command ──► session.apply(...) ──► persist_*() ──► SQLite    │
//! │                              │                     │                    │
//! │                        state changed        failure: warn! only        │
//! │                                                                         │
//! │  Exception: save_email_settings returns its error to the caller.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache is a convenience copy of in-memory state; losing a write must
//! never undo a completed sale.

use tracing::{debug, warn};

use tripus_core::{Bill, Product};
use tripus_store::Database;

#[derive(Debug, Clone)]
pub struct StoreState {
    db: Database,
}

impl StoreState {
    pub fn new(db: Database) -> Self {
        StoreState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let settings = store.inner().snapshots().load_email_settings().await;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Best-effort write of the inventory snapshot.
    pub async fn persist_products(&self, products: &[Product]) {
        match self.db.snapshots().save_products(products).await {
            Ok(()) => debug!(count = products.len(), "Products cached"),
            Err(e) => warn!(error = %e, "Failed to cache products"),
        }
    }

    /// Best-effort write of the bill history snapshot.
    pub async fn persist_bills(&self, bills: &[Bill]) {
        match self.db.snapshots().save_bills(bills).await {
            Ok(()) => debug!(count = bills.len(), "Bills cached"),
            Err(e) => warn!(error = %e, "Failed to cache bills"),
        }
    }
}
