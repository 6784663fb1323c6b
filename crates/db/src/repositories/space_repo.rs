//! Repository for the `spaces` table.

use space_rental_core::query::SpaceQuery;
use space_rental_core::types::DbId;
use sqlx::PgPool;

use crate::models::space::{InsertSpace, SpaceChanges, SpaceRow};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for SELECT / RETURNING. Prices are stored as NUMERIC and read
/// back as FLOAT8.
const COLUMNS: &str = "\
    id, title, description, space_type, location, address, city, state, \
    zip_code, country, \
    price_per_hour::FLOAT8 AS price_per_hour, \
    price_per_day::FLOAT8 AS price_per_day, \
    price_per_week::FLOAT8 AS price_per_week, \
    price_per_month::FLOAT8 AS price_per_month, \
    area_sqft, max_capacity, amenities, is_available, available_from, \
    available_until, photos, created_at, updated_at";

/// Column list for INSERT (excludes `id`, `created_at`, `updated_at`).
const INSERT_COLUMNS: &str = "\
    title, description, space_type, location, address, city, state, \
    zip_code, country, price_per_hour, price_per_day, price_per_week, \
    price_per_month, area_sqft, max_capacity, amenities, is_available, \
    available_from, available_until, photos";

// ---------------------------------------------------------------------------
// SpaceRepo
// ---------------------------------------------------------------------------

/// Provides CRUD and filtered listing for spaces.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Insert a new space, returning the created row.
    pub async fn create(pool: &PgPool, input: &InsertSpace) -> Result<SpaceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO spaces ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                     $10::NUMERIC, $11::NUMERIC, $12::NUMERIC, $13::NUMERIC,
                     $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpaceRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.space_type)
            .bind(&input.location)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.country)
            .bind(input.price_per_hour)
            .bind(input.price_per_day)
            .bind(input.price_per_week)
            .bind(input.price_per_month)
            .bind(input.area_sqft)
            .bind(input.max_capacity)
            .bind(&input.amenities)
            .bind(input.is_available)
            .bind(input.available_from)
            .bind(input.available_until)
            .bind(&input.photos)
            .fetch_one(pool)
            .await
    }

    /// Find a space by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SpaceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE id = $1");
        sqlx::query_as::<_, SpaceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of spaces matching the filter, most recently created first.
    pub async fn list(pool: &PgPool, params: &SpaceQuery) -> Result<Vec<SpaceRow>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_space_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM spaces {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_space_values(sqlx::query_as::<_, SpaceRow>(&query), &bind_values);
        q.bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Count spaces matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &SpaceQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_space_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM spaces {where_clause}");

        let q = bind_space_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// Non-nullable columns use `COALESCE`; nullable columns use a
    /// `CASE WHEN <provided>` pair so they can be cleared. Returns `None` if
    /// no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &SpaceChanges,
    ) -> Result<Option<SpaceRow>, sqlx::Error> {
        let query = format!(
            "UPDATE spaces SET
                title           = COALESCE($2, title),
                description     = COALESCE($3, description),
                space_type      = COALESCE($4, space_type),
                location        = COALESCE($5, location),
                address         = COALESCE($6, address),
                city            = COALESCE($7, city),
                state           = COALESCE($8, state),
                zip_code        = COALESCE($9, zip_code),
                country         = COALESCE($10, country),
                price_per_hour  = CASE WHEN $11 THEN $12::NUMERIC ELSE price_per_hour END,
                price_per_day   = CASE WHEN $13 THEN $14::NUMERIC ELSE price_per_day END,
                price_per_week  = CASE WHEN $15 THEN $16::NUMERIC ELSE price_per_week END,
                price_per_month = CASE WHEN $17 THEN $18::NUMERIC ELSE price_per_month END,
                area_sqft       = CASE WHEN $19 THEN $20 ELSE area_sqft END,
                max_capacity    = CASE WHEN $21 THEN $22 ELSE max_capacity END,
                amenities       = CASE WHEN $23 THEN $24 ELSE amenities END,
                is_available    = COALESCE($25, is_available),
                available_from  = CASE WHEN $26 THEN $27 ELSE available_from END,
                available_until = CASE WHEN $28 THEN $29 ELSE available_until END,
                photos          = CASE WHEN $30 THEN $31 ELSE photos END,
                updated_at      = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpaceRow>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.space_type)
            .bind(&changes.location)
            .bind(&changes.address)
            .bind(&changes.city)
            .bind(&changes.state)
            .bind(&changes.zip_code)
            .bind(&changes.country)
            .bind(changes.price_per_hour.is_some())
            .bind(changes.price_per_hour.flatten())
            .bind(changes.price_per_day.is_some())
            .bind(changes.price_per_day.flatten())
            .bind(changes.price_per_week.is_some())
            .bind(changes.price_per_week.flatten())
            .bind(changes.price_per_month.is_some())
            .bind(changes.price_per_month.flatten())
            .bind(changes.area_sqft.is_some())
            .bind(changes.area_sqft.flatten())
            .bind(changes.max_capacity.is_some())
            .bind(changes.max_capacity.flatten())
            .bind(changes.amenities.is_some())
            .bind(changes.amenities.clone().flatten())
            .bind(changes.is_available)
            .bind(changes.available_from.is_some())
            .bind(changes.available_from.flatten())
            .bind(changes.available_until.is_some())
            .bind(changes.available_until.flatten())
            .bind(changes.photos.is_some())
            .bind(changes.photos.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a space by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// A typed bind value for the dynamic WHERE clause.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(String),
    Float(f64),
    Bool(bool),
}

/// Escape LIKE metacharacters so user input matches literally, then wrap the
/// result for a substring match.
fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Build the WHERE clause for a space listing.
///
/// Returns the clause (empty when no filter is set), the values to bind in
/// order, and the next free placeholder index.
fn build_space_filter(params: &SpaceQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref space_type) = params.space_type {
        conditions.push(format!("space_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(space_type.clone()));
    }

    if let Some(ref city) = params.city {
        conditions.push(format!("city ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(city)));
    }

    if let Some(ref state) = params.state {
        conditions.push(format!("state ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(state)));
    }

    if let Some(min_price) = params.min_price {
        conditions.push(format!("price_per_hour >= ${bind_idx}::NUMERIC"));
        bind_idx += 1;
        bind_values.push(BindValue::Float(min_price));
    }

    if let Some(max_price) = params.max_price {
        conditions.push(format!("price_per_hour <= ${bind_idx}::NUMERIC"));
        bind_idx += 1;
        bind_values.push(BindValue::Float(max_price));
    }

    if let Some(is_available) = params.is_available {
        conditions.push(format!("is_available = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(is_available));
    }

    if let Some(ref search) = params.search {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR description ILIKE ${bind_idx} OR location ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(search)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_space_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_space_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}
