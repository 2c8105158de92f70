//! Storage collaborator seam.
//!
//! The pipeline hands every accepted record to a [`ProductStore`] keyed by
//! `source_url`. Whether that is an insert or an update is the store's call.

use std::collections::BTreeMap;
use std::future::Future;

use tokio::sync::RwLock;
use vitrine_core::ProductRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record rejected: {0}")]
    Rejected(String),
}

/// Upsert-style sink for validated records.
pub trait ProductStore: Send + Sync {
    /// Inserts or replaces the record stored under `record.source_url`.
    fn upsert(&self, record: &ProductRecord) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-process store used by the admin API and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, ProductRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, ordered by source URL.
    pub async fn records(&self) -> Vec<ProductRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

impl ProductStore for MemoryStore {
    async fn upsert(&self, record: &ProductRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.source_url.clone(), record.clone());
        Ok(())
    }
}
