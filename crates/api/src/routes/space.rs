//! Route definitions for the `/spaces` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::space;
use crate::state::AppState;

/// Routes mounted at `/spaces`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(space::list).post(space::create))
        .route("/{id}", get(space::get_by_id).put(space::update))
}
