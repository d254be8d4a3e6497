use axum::routing::post;
use axum::Router;
use lorebook_db::models::Place;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/api/places`.
pub fn router() -> Router<AppState> {
    super::record_routes::<Place>().route("/create", post(records::create::<Place>))
}
