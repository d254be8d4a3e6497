use axum::routing::post;
use axum::Router;
use lorebook_db::models::Character;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/api/characters`.
///
/// Create goes through the character handler so it can accept image parts.
pub fn router() -> Router<AppState> {
    super::record_routes::<Character>().route("/create", post(characters::create))
}
