//! The [`RecordStore`] abstraction and its backends.
//!
//! Every mutating operation is a full read-modify-write of the resource's
//! sequence. Backends serialize those cycles so concurrent writers cannot
//! lose each other's updates.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use lorebook_core::record::Record;
use lorebook_core::types::RecordId;

use crate::error::StoreResult;

/// Result of a successful insert.
#[derive(Debug, Clone)]
pub struct Inserted<R> {
    /// The newly created record, including its assigned id.
    pub record: R,
    /// The full collection after the insert.
    pub records: Vec<R>,
}

/// Durable CRUD over one ordered collection of records.
///
/// Update and delete return `Ok(None)` when no record has the given id.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Load the full collection in stored order.
    async fn load_all(&self) -> StoreResult<Vec<R>>;

    /// Find the first record with `id`.
    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>>;

    /// Append a record built from `fields` under the next free id.
    async fn insert(&self, fields: R::Fields) -> StoreResult<Inserted<R>>;

    /// Replace the declared fields of the record with `id`, keeping its id
    /// and position. Returns the full collection.
    async fn update(&self, id: RecordId, fields: R::Fields) -> StoreResult<Option<Vec<R>>>;

    /// Remove the record with `id`. Returns the full collection.
    async fn delete(&self, id: RecordId) -> StoreResult<Option<Vec<R>>>;
}
