use std::sync::Arc;

use lorebook_db::models::{Character, Place};
use lorebook_db::{JsonFileStore, RecordStore, StoreResult};

use crate::config::ServerConfig;
use crate::uploads::ImageUploads;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Store backing `/api/characters`.
    pub characters: Arc<dyn RecordStore<Character>>,
    /// Store backing `/api/places`.
    pub places: Arc<dyn RecordStore<Place>>,
    /// Destination for images attached to new characters.
    pub uploads: Arc<ImageUploads>,
}

impl AppState {
    /// Open the file-backed stores named in `config`.
    ///
    /// Missing resource files are created empty.
    pub async fn open(config: ServerConfig) -> StoreResult<Self> {
        let characters = JsonFileStore::<Character>::open(&config.characters_file).await?;
        let places = JsonFileStore::<Place>::open(&config.places_file).await?;
        let uploads = ImageUploads::new(&config.assets_dir);

        Ok(Self {
            config: Arc::new(config),
            characters: Arc::new(characters),
            places: Arc::new(places),
            uploads: Arc::new(uploads),
        })
    }
}
