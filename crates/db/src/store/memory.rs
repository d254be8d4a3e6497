use async_trait::async_trait;
use lorebook_core::record::{self, Record};
use lorebook_core::types::RecordId;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::{Inserted, RecordStore};

/// A [`RecordStore`] holding its collection in memory.
///
/// Behaves like [`JsonFileStore`](crate::store::JsonFileStore) minus the
/// file: useful for tests and for running without a data directory.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start from an existing collection, kept in the given order.
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn load_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        let records = self.records.read().await;
        Ok(record::find_by_id(&records, id).map(|found| found.record.clone()))
    }

    async fn insert(&self, fields: R::Fields) -> StoreResult<Inserted<R>> {
        let mut records = self.records.write().await;
        let record = record::insert(&mut records, fields)?;
        Ok(Inserted {
            record,
            records: records.clone(),
        })
    }

    async fn update(&self, id: RecordId, fields: R::Fields) -> StoreResult<Option<Vec<R>>> {
        let mut records = self.records.write().await;
        Ok(record::replace(&mut records, id, fields).then(|| records.clone()))
    }

    async fn delete(&self, id: RecordId) -> StoreResult<Option<Vec<R>>> {
        let mut records = self.records.write().await;
        Ok(record::remove(&mut records, id).map(|_| records.clone()))
    }
}
