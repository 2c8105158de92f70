//! JSON catalog file used as the storage collaborator for batch imports.
//!
//! The file is an object keyed by `source_url`, so re-importing a page
//! replaces its records in place. Writes go to a sibling temp file that is
//! then renamed over the target.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use vitrine_core::ProductRecord;
use vitrine_scraper::{ProductStore, StoreError};

pub(crate) struct CatalogFile {
    path: PathBuf,
    records: Mutex<BTreeMap<String, ProductRecord>>,
}

impl CatalogFile {
    /// Loads `path`, or starts empty if it does not exist yet.
    pub(crate) async fn open(path: &Path) -> Result<Self, StoreError> {
        let records = match tokio::fs::read_to_string(path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            records: Mutex::new(records),
        })
    }

    pub(crate) async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Writes every record back to disk.
    pub(crate) async fn flush(&self) -> Result<(), StoreError> {
        let json = {
            let records = self.records.lock().await;
            serde_json::to_string_pretty(&*records)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl ProductStore for CatalogFile {
    async fn upsert(&self, record: &ProductRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .insert(record.source_url.clone(), record.clone());
        Ok(())
    }
}
