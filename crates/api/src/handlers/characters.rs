//! Character creation, which alone accepts image attachments.
//!
//! `POST /api/characters/create` takes either a JSON body of character
//! fields or a `multipart/form-data` body whose text parts are the fields and
//! whose `profile` / `map` file parts are images.

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lorebook_core::record::Record;
use lorebook_db::models::{Character, CharacterFields};

use crate::error::AppResult;
use crate::state::AppState;
use crate::uploads::{Attachment, ImageField};

/// A character create request, decoded from JSON or multipart.
#[derive(Debug, Default)]
pub struct CharacterSubmission {
    pub fields: CharacterFields,
    pub attachments: Vec<Attachment>,
}

impl<S> FromRequest<S> for CharacterSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(fields) = Json::<CharacterFields>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self {
                fields,
                attachments: Vec::new(),
            });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        read_multipart(multipart)
            .await
            .map_err(IntoResponse::into_response)
    }
}

/// Collect character fields and image parts; other parts are ignored.
///
/// Empty file parts (a form submitted without choosing a file) are skipped.
/// Errors keep their own status, so an oversized body stays a 413.
async fn read_multipart(mut multipart: Multipart) -> Result<CharacterSubmission, MultipartError> {
    let mut submission = CharacterSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if let Some(image) = ImageField::from_name(&name) {
            let data = field.bytes().await?;
            if !data.is_empty() {
                submission.attachments.push(Attachment { field: image, data });
            }
        } else if CharacterFields::NAMES.contains(&name.as_str()) {
            let text = field.text().await?;
            submission.fields.set(&name, text);
        }
    }

    Ok(submission)
}

/// POST /api/characters/create
///
/// Inserts the character, then writes any attachments under the new id.
/// Attachment failures are logged and do not affect the response.
pub async fn create(
    State(state): State<AppState>,
    submission: CharacterSubmission,
) -> AppResult<Json<Vec<Character>>> {
    let CharacterSubmission {
        fields,
        attachments,
    } = submission;

    let inserted = state.characters.insert(fields).await?;
    let id = inserted.record.id;
    tracing::info!(
        entity = Character::ENTITY,
        id,
        attachments = attachments.len(),
        "Created record"
    );

    if !attachments.is_empty() {
        state.uploads.save_all(id, &attachments).await;
    }

    Ok(Json(inserted.records))
}
