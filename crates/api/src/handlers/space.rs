//! Handlers for the `/spaces` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use space_rental_core::error::CoreError;
use space_rental_core::query::{total_pages, SpaceQuery};
use space_rental_core::space::{NewSpace, Space, SpacePatch, ENTITY};
use space_rental_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::SpaceListResponse;
use crate::services::SpaceService;
use crate::state::AppState;

/// GET /api/v1/spaces
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SpaceQuery>,
) -> AppResult<Json<SpaceListResponse>> {
    let (page, per_page) = (query.page, query.per_page);
    let (spaces, total) = SpaceService::new(&state.pool).list(query).await?;

    Ok(Json(SpaceListResponse {
        spaces,
        total,
        page,
        per_page,
        total_pages: total_pages(total, per_page),
    }))
}

/// POST /api/v1/spaces
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewSpace>,
) -> AppResult<(StatusCode, Json<Space>)> {
    let space = SpaceService::new(&state.pool).create(input).await?;
    Ok((StatusCode::CREATED, Json(space)))
}

/// GET /api/v1/spaces/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Space>> {
    let space = SpaceService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(space))
}

/// PUT /api/v1/spaces/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<SpacePatch>,
) -> AppResult<Json<Space>> {
    let space = SpaceService::new(&state.pool).update(id, patch).await?;
    Ok(Json(space))
}
