use std::collections::HashMap;
use async_trait::async_trait;
use parking_lot::Mutex;
use crate::error::{ResourceError, ResourceResult};
use crate::resource::Resource;
use super::RecordStore;

/// In-process record store with the same key semantics as the record table.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<Resource>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a record as-is, for seeding fixtures that a valid write
    /// path would never produce (for example a version without `createdDate`).
    pub fn seed(&self, record: Resource) -> ResourceResult<()> {
        let identifier = record.resource_identifier.clone()
            .ok_or_else(|| ResourceError::store("record has no resource_identifier"))?;
        let modified = record.modified_date
            .ok_or_else(|| ResourceError::store(format!("record {} has no modifiedDate", identifier)))?;

        let mut records = self.records.lock();
        let versions = records.entry(identifier).or_default();
        versions.retain(|v| v.modified_date != Some(modified));
        versions.push(record);
        versions.sort_by_key(|v| v.modified_date);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, identifier: &str) -> ResourceResult<Option<Resource>> {
        Ok(self.records.lock().get(identifier).and_then(|v| v.last().cloned()))
    }

    async fn put(&self, record: &Resource) -> ResourceResult<()> {
        self.seed(record.clone())
    }

    async fn delete(&self, identifier: &str) -> ResourceResult<usize> {
        Ok(self.records.lock().remove(identifier).map(|v| v.len()).unwrap_or(0))
    }

    async fn query_all_versions(&self, identifier: &str) -> ResourceResult<Vec<Resource>> {
        Ok(self.records.lock().get(identifier).cloned().unwrap_or_default())
    }
}
