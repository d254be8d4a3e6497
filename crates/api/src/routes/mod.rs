pub mod characters;
pub mod health;
pub mod places;

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::records::{self, Resource};
use crate::state::AppState;

/// Plain-text liveness string served at `GET /api`.
pub const LIVENESS_TEXT: &str = "API on fleek !";

/// Build the `/api` route tree.
///
/// ```text
/// GET    /                                   liveness text
///
/// /characters                                list
/// /characters/{id}                           get
/// /characters/edit/{id}                      edit (PATCH)
/// /characters/create                         create (POST, JSON or multipart)
/// /characters/delete/{id}                    delete (DELETE)
///
/// /places                                    list
/// /places/{id}                               get
/// /places/edit/{id}                          edit (PATCH)
/// /places/create                             create (POST)
/// /places/delete/{id}                        delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .nest("/characters", characters::router())
        .nest("/places", places::router())
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Read, edit and delete routes shared by every resource.
///
/// Create is mounted by each resource's own router.
pub(crate) fn record_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list::<R>))
        .route("/{id}", get(records::get_by_id::<R>))
        .route("/edit/{id}", patch(records::edit::<R>))
        .route("/delete/{id}", delete(records::delete::<R>))
}
