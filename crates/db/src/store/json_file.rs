use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lorebook_core::record::{self, Record};
use lorebook_core::types::RecordId;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{Inserted, RecordStore};

/// Indentation used when rewriting resource files.
const INDENT: &[u8] = b"    ";

/// A [`RecordStore`] backed by a single JSON array file.
///
/// Reads share the lock. Each mutating call holds the write lock across its
/// whole read-modify-write cycle, and the file is replaced atomically through
/// a sibling temp file followed by a rename.
pub struct JsonFileStore<R> {
    path: PathBuf,
    lock: RwLock<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileStore<R> {
    /// Open the store at `path`, creating the parent directory and an empty
    /// `[]` file if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(parent, source))?;
        }

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| io_error(&path, source))?;
        if !exists {
            tokio::fs::write(&path, b"[]\n")
                .await
                .map_err(|source| io_error(&path, source))?;
            tracing::info!(entity = R::ENTITY, path = %path.display(), "Created empty resource file");
        }

        Ok(Self {
            path,
            lock: RwLock::new(()),
            _record: PhantomData,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> StoreResult<Vec<R>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| io_error(&self.path, source))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_file(&self, records: &[R]) -> StoreResult<()> {
        let mut buf = Vec::new();
        {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            records
                .serialize(&mut serializer)
                .map_err(StoreError::Serialize)?;
        }
        buf.push(b'\n');

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &buf)
            .await
            .map_err(|source| io_error(&tmp, source))?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(&self.path, source));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "records.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    async fn load_all(&self) -> StoreResult<Vec<R>> {
        let _guard = self.lock.read().await;
        self.read_file().await
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        let _guard = self.lock.read().await;
        let records = self.read_file().await?;
        Ok(record::find_by_id(&records, id).map(|found| found.record.clone()))
    }

    async fn insert(&self, fields: R::Fields) -> StoreResult<Inserted<R>> {
        let _guard = self.lock.write().await;
        let mut records = self.read_file().await?;
        let record = record::insert(&mut records, fields)?;
        self.write_file(&records).await?;
        tracing::debug!(entity = R::ENTITY, id = record.id(), count = records.len(), "Inserted record");
        Ok(Inserted { record, records })
    }

    async fn update(&self, id: RecordId, fields: R::Fields) -> StoreResult<Option<Vec<R>>> {
        let _guard = self.lock.write().await;
        let mut records = self.read_file().await?;
        if !record::replace(&mut records, id, fields) {
            return Ok(None);
        }
        self.write_file(&records).await?;
        tracing::debug!(entity = R::ENTITY, id, "Updated record");
        Ok(Some(records))
    }

    async fn delete(&self, id: RecordId) -> StoreResult<Option<Vec<R>>> {
        let _guard = self.lock.write().await;
        let mut records = self.read_file().await?;
        if record::remove(&mut records, id).is_none() {
            return Ok(None);
        }
        self.write_file(&records).await?;
        tracing::debug!(entity = R::ENTITY, id, count = records.len(), "Deleted record");
        Ok(Some(records))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl<R> std::fmt::Debug for JsonFileStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
