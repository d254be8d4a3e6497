//! Persistence for lorebook resources.
//!
//! Each resource type lives in its own JSON array file. [`store::RecordStore`]
//! is the storage abstraction handlers depend on; [`store::JsonFileStore`] is
//! the production backend and [`store::MemoryStore`] stands in for tests.

pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Inserted, JsonFileStore, MemoryStore, RecordStore};

/// Check that a store's backing data can currently be loaded.
pub async fn health_check<R: lorebook_core::record::Record>(
    store: &dyn RecordStore<R>,
) -> StoreResult<()> {
    store.load_all().await.map(|_| ())
}
