//! Integration tests for `SpaceRepo` against a real database.
//!
//! Exercises create, lookup, filtered listing, partial update and delete,
//! including the lossy decode of corrupted list columns.

use space_rental_core::query::SpaceQuery;
use space_rental_core::space::{NewSpace, Space, SpacePatch};
use space_rental_db::models::space::{InsertSpace, SpaceChanges};
use space_rental_db::repositories::SpaceRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_space(title: &str, city: &str, space_type: &str, price_per_hour: f64) -> InsertSpace {
    InsertSpace::from(NewSpace {
        title: title.to_string(),
        description: "A clean and secure space available for rent.".to_string(),
        space_type: space_type.to_string(),
        location: "Neighbourhood".to_string(),
        address: "100 Example Avenue".to_string(),
        city: city.to_string(),
        state: "WA".to_string(),
        zip_code: "98101".to_string(),
        country: "US".to_string(),
        price_per_hour: Some(price_per_hour),
        price_per_day: None,
        price_per_week: None,
        price_per_month: None,
        area_sqft: Some(250),
        max_capacity: None,
        amenities: Some(vec!["WiFi".to_string(), "Lighting".to_string()]),
        is_available: true,
        available_from: None,
        available_until: None,
        photos: None,
    })
}

fn patch(json: serde_json::Value) -> SpaceChanges {
    let patch: SpacePatch = serde_json::from_value(json).unwrap();
    SpaceChanges::from(patch.validated().unwrap())
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_id_and_timestamps(pool: PgPool) {
    let row = SpaceRepo::create(&pool, &new_space("Two-Car Garage", "Seattle", "garage", 12.5))
        .await
        .unwrap();

    assert!(row.id > 0);
    assert_eq!(row.title, "Two-Car Garage");
    assert_eq!(row.price_per_hour, Some(12.5));
    assert_eq!(row.country, "US");
    assert_eq!(row.created_at, row.updated_at);
    assert_eq!(row.amenities.as_deref(), Some(r#"["WiFi","Lighting"]"#));
    assert_eq!(row.photos, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ids_are_unique(pool: PgPool) {
    let a = SpaceRepo::create(&pool, &new_space("First Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    let b = SpaceRepo::create(&pool, &new_space("Second Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    let found = SpaceRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_most_recent_first(pool: PgPool) {
    for i in 0..3 {
        SpaceRepo::create(&pool, &new_space(&format!("Garage {i:02}"), "Seattle", "garage", 10.0))
            .await
            .unwrap();
    }

    let rows = SpaceRepo::list(&pool, &SpaceQuery::default()).await.unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Garage 02", "Garage 01", "Garage 00"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_and_counts(pool: PgPool) {
    for i in 0..5 {
        SpaceRepo::create(&pool, &new_space(&format!("Storage {i}"), "Seattle", "garage", 10.0))
            .await
            .unwrap();
    }

    let params = SpaceQuery {
        page: 2,
        per_page: 2,
        ..Default::default()
    };
    let rows = SpaceRepo::list(&pool, &params).await.unwrap();
    let total = SpaceRepo::count(&pool, &params).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(total, 5);
    assert_eq!(rows[0].title, "Storage 2");

    let last = SpaceQuery {
        page: 3,
        per_page: 2,
        ..Default::default()
    };
    assert_eq!(SpaceRepo::list(&pool, &last).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_by_type_and_city(pool: PgPool) {
    SpaceRepo::create(&pool, &new_space("Seattle Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Seattle Attic", "Seattle", "attic", 10.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Portland Garage", "Portland", "garage", 10.0))
        .await
        .unwrap();

    let params = SpaceQuery {
        space_type: Some("garage".to_string()),
        city: Some("seattle".to_string()),
        ..Default::default()
    };
    let rows = SpaceRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Seattle Garage");
    assert_eq!(SpaceRepo::count(&pool, &params).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_by_state_is_case_insensitive(pool: PgPool) {
    SpaceRepo::create(&pool, &new_space("Seattle Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    let mut portland = new_space("Portland Garage", "Portland", "garage", 10.0);
    portland.state = "OR".to_string();
    SpaceRepo::create(&pool, &portland).await.unwrap();

    let params = SpaceQuery {
        state: Some("wa".to_string()),
        ..Default::default()
    };
    let rows = SpaceRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].state, "WA");
    assert_eq!(SpaceRepo::count(&pool, &params).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_by_hourly_price_range(pool: PgPool) {
    SpaceRepo::create(&pool, &new_space("Cheap Garage", "Seattle", "garage", 5.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Mid Garage", "Seattle", "garage", 15.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Pricey Garage", "Seattle", "garage", 40.0))
        .await
        .unwrap();

    let mut monthly = new_space("Monthly Garage", "Seattle", "garage", 1.0);
    monthly.price_per_hour = None;
    monthly.price_per_month = Some(15.0);
    SpaceRepo::create(&pool, &monthly).await.unwrap();

    let params = SpaceQuery {
        min_price: Some(10.0),
        max_price: Some(15.0),
        ..Default::default()
    };
    let rows = SpaceRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Mid Garage");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_title_description_or_location(pool: PgPool) {
    let mut by_location = new_space("Plain Garage", "Seattle", "garage", 10.0);
    by_location.location = "Next to the Workshop".to_string();
    SpaceRepo::create(&pool, &by_location).await.unwrap();
    SpaceRepo::create(&pool, &new_space("WORKSHOP Basement", "Seattle", "basement", 10.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Quiet Attic", "Seattle", "attic", 10.0))
        .await
        .unwrap();

    let params = SpaceQuery {
        search: Some("workshop".to_string()),
        ..Default::default()
    };
    assert_eq!(SpaceRepo::count(&pool, &params).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    SpaceRepo::create(&pool, &new_space("Garage 100% dry", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    SpaceRepo::create(&pool, &new_space("Garage 100 dry", "Seattle", "garage", 10.0))
        .await
        .unwrap();

    let params = SpaceQuery {
        search: Some("100%".to_string()),
        ..Default::default()
    };
    assert_eq!(SpaceRepo::count(&pool, &params).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_corrupted_amenities_list_as_empty(pool: PgPool) {
    let row = SpaceRepo::create(&pool, &new_space("Broken Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();
    sqlx::query("UPDATE spaces SET amenities = '[\"WiFi\", ' WHERE id = $1")
        .bind(row.id)
        .execute(&pool)
        .await
        .unwrap();

    let rows = SpaceRepo::list(&pool, &SpaceQuery::default()).await.unwrap();
    let spaces: Vec<Space> = rows.into_iter().map(Space::from).collect();
    assert_eq!(spaces.len(), 1);
    assert!(spaces[0].amenities.is_empty());
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_changes_only_supplied_fields(pool: PgPool) {
    let created = SpaceRepo::create(&pool, &new_space("Old Title Here", "Seattle", "garage", 10.0))
        .await
        .unwrap();

    let updated = SpaceRepo::update(&pool, created.id, &patch(serde_json::json!({"city": "Tacoma"})))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.city, "Tacoma");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.price_per_hour, created.price_per_hour);
    assert_eq!(updated.amenities, created.amenities);
    assert_eq!(updated.area_sqft, created.area_sqft);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_explicit_null_clears_nullable_column(pool: PgPool) {
    let created = SpaceRepo::create(&pool, &new_space("Clearable Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();

    let changes = patch(serde_json::json!({
        "area_sqft": null,
        "amenities": null,
        "price_per_hour": null,
        "price_per_week": 99.99
    }));
    let updated = SpaceRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.area_sqft, None);
    assert_eq!(updated.amenities, None);
    assert_eq!(updated.price_per_hour, None);
    assert_eq!(updated.price_per_week, Some(99.99));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = SpaceRepo::update(&pool, 999_999, &patch(serde_json::json!({"city": "Tacoma"})))
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(SpaceRepo::count(&pool, &SpaceQuery::default()).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_row(pool: PgPool) {
    let created = SpaceRepo::create(&pool, &new_space("Doomed Garage", "Seattle", "garage", 10.0))
        .await
        .unwrap();

    assert!(SpaceRepo::delete(&pool, created.id).await.unwrap());
    assert!(SpaceRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(!SpaceRepo::delete(&pool, created.id).await.unwrap());
}
