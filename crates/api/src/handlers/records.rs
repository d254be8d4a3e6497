//! Handlers shared by every record resource.
//!
//! Each handler is generic over a [`Resource`], which picks the store out of
//! [`AppState`]. Point reads return the record; mutations return the whole
//! collection as it stands after the write.

use axum::extract::{Path, State};
use axum::Json;
use lorebook_core::error::CoreError;
use lorebook_core::record::Record;
use lorebook_core::types::RecordId;
use lorebook_db::models::{Character, Place};
use lorebook_db::RecordStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A record type served over HTTP.
pub trait Resource: Record {
    fn store(state: &AppState) -> &dyn RecordStore<Self>;
}

impl Resource for Character {
    fn store(state: &AppState) -> &dyn RecordStore<Self> {
        state.characters.as_ref()
    }
}

impl Resource for Place {
    fn store(state: &AppState) -> &dyn RecordStore<Self> {
        state.places.as_ref()
    }
}

fn not_found<R: Resource>(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

/// GET /api/{resource}
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<Json<Vec<R>>> {
    let records = R::store(&state).load_all().await?;
    Ok(Json(records))
}

/// GET /api/{resource}/{id}
pub async fn get_by_id<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<R>> {
    let record = R::store(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(record))
}

/// POST /api/{resource}/create
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Json(fields): Json<R::Fields>,
) -> AppResult<Json<Vec<R>>> {
    let inserted = R::store(&state).insert(fields).await?;
    tracing::info!(entity = R::ENTITY, id = inserted.record.id(), "Created record");
    Ok(Json(inserted.records))
}

/// PATCH /api/{resource}/edit/{id}
///
/// Replaces every declared field with the payload's value; fields missing
/// from the payload are cleared. The id never changes.
pub async fn edit<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(fields): Json<R::Fields>,
) -> AppResult<Json<Vec<R>>> {
    let records = R::store(&state)
        .update(id, fields)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(records))
}

/// DELETE /api/{resource}/delete/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<Vec<R>>> {
    let records = R::store(&state)
        .delete(id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(entity = R::ENTITY, id, "Deleted record");
    Ok(Json(records))
}
