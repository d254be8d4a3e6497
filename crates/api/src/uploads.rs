//! Image attachments submitted with a new character.
//!
//! Each attachment is written to `<assets_dir>/<field>/<id>.jpg`, whatever
//! its real format. Failures are logged and never reach the client.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use lorebook_core::types::RecordId;

/// Multipart part names that carry character images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Profile,
    Map,
}

impl ImageField {
    pub const ALL: [ImageField; 2] = [ImageField::Profile, ImageField::Map];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageField::Profile => "profile",
            ImageField::Map => "map",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// One uploaded image waiting for its record id.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub field: ImageField,
    pub data: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes character images under a fixed directory tree.
#[derive(Debug, Clone)]
pub struct ImageUploads {
    root: PathBuf,
}

impl ImageUploads {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination of `field`'s image for the record `id`.
    pub fn path_for(&self, field: ImageField, id: RecordId) -> PathBuf {
        self.root.join(field.as_str()).join(format!("{id}.jpg"))
    }

    /// Write one attachment, creating its directory on demand.
    pub async fn save(&self, id: RecordId, attachment: &Attachment) -> Result<PathBuf, UploadError> {
        let path = self.path_for(attachment.field, id);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| UploadError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, &attachment.data)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Write every attachment for `id`, logging each failure.
    ///
    /// Returns the number of images written.
    pub async fn save_all(&self, id: RecordId, attachments: &[Attachment]) -> usize {
        let mut written = 0;
        for attachment in attachments {
            match self.save(id, attachment).await {
                Ok(path) => {
                    written += 1;
                    tracing::info!(
                        field = attachment.field.as_str(),
                        id,
                        bytes = attachment.data.len(),
                        path = %path.display(),
                        "Stored character image"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        field = attachment.field.as_str(),
                        id,
                        error = %err,
                        "Failed to store character image"
                    );
                }
            }
        }
        written
    }
}
