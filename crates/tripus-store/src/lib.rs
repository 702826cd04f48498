//! # tripus-store: Snapshot Cache for TriPUS
//!
//! Persists inventory, bills and email settings as JSON snapshots in SQLite.
//! Everything else (sales ledger, customers, credit ledger) is regenerated
//! per session and never stored.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TriPUS Data Flow                                 │
//! │                                                                         │
//! │  Command (checkout, add_product, save_email_settings)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tripus-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ SnapshotRepository │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ products / bills / │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ email-settings     │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot_cache(key, payload, updated_at)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tripus_store::{Database, StoreConfig};
//!
//! let db = Database::new(StoreConfig::new("tripus.db")).await?;
//! let products = db.snapshots().load_products().await;
//! db.snapshots().save_products(&products).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, StoreConfig};
pub use repository::snapshot::{SnapshotKey, SnapshotRepository};
