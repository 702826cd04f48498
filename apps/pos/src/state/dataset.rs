//! # Dataset State
//!
//! The synthetic sales ledger and stock catalog generated at startup.
//! Both are read-only for the life of the process.

use std::sync::Arc;

use tripus_core::{CatalogEntry, SalesRecord};

#[derive(Debug, Clone, Default)]
pub struct DatasetState {
    ledger: Arc<Vec<SalesRecord>>,
    catalog: Arc<Vec<CatalogEntry>>,
}

impl DatasetState {
    pub fn new(ledger: Vec<SalesRecord>, catalog: Vec<CatalogEntry>) -> Self {
        DatasetState {
            ledger: Arc::new(ledger),
            catalog: Arc::new(catalog),
        }
    }

    pub fn ledger(&self) -> &[SalesRecord] {
        &self.ledger
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }
}
