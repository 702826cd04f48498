//! # Snapshot Repository
//!
//! Stores local state as JSON payloads keyed by name.
//!
//! ## Load Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_products()                                                       │
//! │       │                                                                 │
//! │       ├── row missing        ──► default_products()                    │
//! │       ├── payload corrupt    ──► warn! + default_products()            │
//! │       ├── query failed       ──► warn! + default_products()            │
//! │       └── payload parsed     ──► Vec<Product>                          │
//! │                                                                         │
//! │  Bills fall back to an empty list, settings to EmailSettings::default()│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Saves are upserts: one row per key, last writer wins.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use tripus_core::generator::default_products;
use tripus_core::{Bill, EmailSettings, Product};

// =============================================================================
// Keys
// =============================================================================

/// Well-known snapshot keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKey {
    Products,
    Bills,
    EmailSettings,
}

impl SnapshotKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::Products => "products",
            SnapshotKey::Bills => "bills",
            SnapshotKey::EmailSettings => "email-settings",
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for snapshot cache operations.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Returns the raw payload stored under `key`, if any.
    pub async fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM snapshot_cache WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    /// Inserts or replaces the payload stored under `key`.
    pub async fn put_raw(&self, key: &str, payload: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshot_cache (key, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = payload.len(), "Snapshot saved");
        Ok(())
    }

    /// Deserializes the payload under `key`.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nothing stored
    /// * `Err(StoreError::Corrupt)` - Payload does not parse as `T`
    pub async fn load<T: DeserializeOwned>(&self, key: SnapshotKey) -> StoreResult<Option<T>> {
        let Some(raw) = self.get_raw(key.as_str()).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key.as_str(), e))
    }

    /// Serializes `value` and stores it under `key`.
    pub async fn save<T: Serialize>(&self, key: SnapshotKey, value: &T) -> StoreResult<()> {
        let payload = serde_json::to_string(value)?;
        self.put_raw(key.as_str(), &payload).await
    }

    /// Loads `key`, falling back to `default` when it is missing or unreadable.
    async fn load_or<T, F>(&self, key: SnapshotKey, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.load(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key = key.as_str(), "No snapshot stored, using defaults");
                default()
            }
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Snapshot unreadable, using defaults");
                default()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Typed snapshots
    // -------------------------------------------------------------------------

    /// Inventory, or the default product list.
    pub async fn load_products(&self) -> Vec<Product> {
        self.load_or(SnapshotKey::Products, default_products).await
    }

    pub async fn save_products(&self, products: &[Product]) -> StoreResult<()> {
        self.save(SnapshotKey::Products, &products).await
    }

    /// Generated bills, or an empty list.
    pub async fn load_bills(&self) -> Vec<Bill> {
        self.load_or(SnapshotKey::Bills, Vec::new).await
    }

    pub async fn save_bills(&self, bills: &[Bill]) -> StoreResult<()> {
        self.save(SnapshotKey::Bills, &bills).await
    }

    /// Sender settings, or unconfigured defaults.
    pub async fn load_email_settings(&self) -> EmailSettings {
        self.load_or(SnapshotKey::EmailSettings, EmailSettings::default)
            .await
    }

    pub async fn save_email_settings(&self, settings: &EmailSettings) -> StoreResult<()> {
        self.save(SnapshotKey::EmailSettings, settings).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
