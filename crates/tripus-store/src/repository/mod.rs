//! # Repository Module
//!
//! Repositories over the snapshot cache.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Command (checkout, save_settings, ...)                                │
//! │       │                                                                 │
//! │       │  db.snapshots().save_bills(&bills)                             │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                    │
//! │  ├── load_products / save_products                                     │
//! │  ├── load_bills / save_bills                                           │
//! │  └── load_email_settings / save_email_settings                         │
//! │       │                                                                 │
//! │       │  SQL (upsert on key)                                            │
//! │       ▼                                                                 │
//! │  snapshot_cache table                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - JSON snapshots by key

pub mod snapshot;
