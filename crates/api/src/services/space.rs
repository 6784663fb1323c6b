//! Space service.
//!
//! Validates inputs, maps them onto storage (list fields are encoded on the
//! way in and decoded on the way out) and delegates to [`SpaceRepo`]. Every
//! write is a single statement, so it is committed before the call returns.

use space_rental_core::error::CoreError;
use space_rental_core::query::SpaceQuery;
use space_rental_core::space::{NewSpace, Space, SpacePatch, ENTITY};
use space_rental_core::types::DbId;
use space_rental_db::models::space::{InsertSpace, SpaceChanges};
use space_rental_db::repositories::SpaceRepo;
use sqlx::PgPool;

use crate::error::AppResult;

/// Create, read, update and delete operations for spaces.
///
/// Borrows the pool, so constructing one per request costs nothing.
pub struct SpaceService<'a> {
    pool: &'a PgPool,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

impl<'a> SpaceService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new space, returning it with its assigned id
    /// and timestamps.
    pub async fn create(&self, input: NewSpace) -> AppResult<Space> {
        let input = input.validated()?;
        let row = SpaceRepo::create(self.pool, &InsertSpace::from(input)).await?;

        tracing::info!(space_id = row.id, space_type = %row.space_type, "Space created");
        Ok(Space::from(row))
    }

    /// Look up a space. A missing id is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<Space>> {
        let row = SpaceRepo::find_by_id(self.pool, id).await?;
        Ok(row.map(Space::from))
    }

    /// One page of spaces matching `query`, plus the total match count.
    pub async fn list(&self, query: SpaceQuery) -> AppResult<(Vec<Space>, i64)> {
        let query = query.validated()?;

        let total = SpaceRepo::count(self.pool, &query).await?;
        let rows = SpaceRepo::list(self.pool, &query).await?;

        tracing::debug!(
            total,
            returned = rows.len(),
            page = query.page,
            per_page = query.per_page,
            "Listed spaces"
        );
        Ok((rows.into_iter().map(Space::from).collect(), total))
    }

    /// Apply a partial update.
    ///
    /// Fails with `NotFound` (and writes nothing) when the id is unknown. The
    /// single-price-tier rule is checked against the stored record merged
    /// with the patch.
    pub async fn update(&self, id: DbId, patch: SpacePatch) -> AppResult<Space> {
        let patch = patch.validated()?;

        let current = SpaceRepo::find_by_id(self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        patch.check_prices_against(&current.prices())?;

        let row = SpaceRepo::update(self.pool, id, &SpaceChanges::from(patch))
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(space_id = id, "Space updated");
        Ok(Space::from(row))
    }

    /// Permanently remove a space. Returns `false` if it did not exist.
    pub async fn delete(&self, id: DbId) -> AppResult<bool> {
        let deleted = SpaceRepo::delete(self.pool, id).await?;
        if deleted {
            tracing::info!(space_id = id, "Space deleted");
        }
        Ok(deleted)
    }
}
