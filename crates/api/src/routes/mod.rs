pub mod health;
pub mod space;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /spaces                 list, create
/// /spaces/{id}            get, update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/spaces", space::router())
}
