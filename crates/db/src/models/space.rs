//! Storage mapping for the `spaces` table.
//!
//! [`SpaceRow`] mirrors the table (list fields as JSON text, prices read back
//! as `FLOAT8`). Conversion to the plain [`Space`] record decodes list fields
//! lossily: a malformed value becomes an empty list and is logged.

use space_rental_core::encoding::{decode_list_lossy, encode_list};
use space_rental_core::space::{NewSpace, PriceTiers, Space, SpacePatch};
use space_rental_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `spaces` table.
#[derive(Debug, Clone, FromRow)]
pub struct SpaceRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub space_type: String,
    pub location: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub price_per_hour: Option<f64>,
    pub price_per_day: Option<f64>,
    pub price_per_week: Option<f64>,
    pub price_per_month: Option<f64>,
    pub area_sqft: Option<i32>,
    pub max_capacity: Option<i32>,
    pub amenities: Option<String>,
    pub is_available: bool,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,
    pub photos: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SpaceRow {
    pub fn prices(&self) -> PriceTiers {
        PriceTiers {
            per_hour: self.price_per_hour,
            per_day: self.price_per_day,
            per_week: self.price_per_week,
            per_month: self.price_per_month,
        }
    }
}

/// Decode a list column, logging and discarding malformed text.
fn decode_column(id: DbId, column: &'static str, raw: Option<&str>) -> Vec<String> {
    let (items, err) = decode_list_lossy(raw);
    if let Some(err) = err {
        tracing::warn!(
            space_id = id,
            column,
            error = %err,
            "Malformed list column, substituting empty list"
        );
    }
    items
}

impl From<SpaceRow> for Space {
    fn from(row: SpaceRow) -> Self {
        let amenities = decode_column(row.id, "amenities", row.amenities.as_deref());
        let photos = decode_column(row.id, "photos", row.photos.as_deref());
        Space {
            id: row.id,
            title: row.title,
            description: row.description,
            space_type: row.space_type,
            location: row.location,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            price_per_hour: row.price_per_hour,
            price_per_day: row.price_per_day,
            price_per_week: row.price_per_week,
            price_per_month: row.price_per_month,
            area_sqft: row.area_sqft,
            max_capacity: row.max_capacity,
            amenities,
            is_available: row.is_available,
            available_from: row.available_from,
            available_until: row.available_until,
            photos,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Values for inserting a space, with list fields already encoded.
#[derive(Debug, Clone)]
pub struct InsertSpace {
    pub title: String,
    pub description: String,
    pub space_type: String,
    pub location: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub price_per_hour: Option<f64>,
    pub price_per_day: Option<f64>,
    pub price_per_week: Option<f64>,
    pub price_per_month: Option<f64>,
    pub area_sqft: Option<i32>,
    pub max_capacity: Option<i32>,
    pub amenities: Option<String>,
    pub is_available: bool,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,
    pub photos: Option<String>,
}

impl From<NewSpace> for InsertSpace {
    fn from(input: NewSpace) -> Self {
        InsertSpace {
            amenities: encode_list(input.amenities.as_deref()),
            photos: encode_list(input.photos.as_deref()),
            title: input.title,
            description: input.description,
            space_type: input.space_type,
            location: input.location,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            country: input.country,
            price_per_hour: input.price_per_hour,
            price_per_day: input.price_per_day,
            price_per_week: input.price_per_week,
            price_per_month: input.price_per_month,
            area_sqft: input.area_sqft,
            max_capacity: input.max_capacity,
            is_available: input.is_available,
            available_from: input.available_from,
            available_until: input.available_until,
        }
    }
}

/// Column changes for a partial update.
///
/// Non-nullable columns use `Option<T>` (`None` keeps the stored value).
/// Nullable columns use `Option<Option<T>>` so `Some(None)` can clear them.
#[derive(Debug, Clone, Default)]
pub struct SpaceChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub space_type: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub price_per_hour: Option<Option<f64>>,
    pub price_per_day: Option<Option<f64>>,
    pub price_per_week: Option<Option<f64>>,
    pub price_per_month: Option<Option<f64>>,
    pub area_sqft: Option<Option<i32>>,
    pub max_capacity: Option<Option<i32>>,
    pub amenities: Option<Option<String>>,
    pub is_available: Option<bool>,
    pub available_from: Option<Option<Timestamp>>,
    pub available_until: Option<Option<Timestamp>>,
    pub photos: Option<Option<String>>,
}

/// Re-encode a list patch: `null` and `[]` both clear the column.
fn encode_list_patch(value: Option<Option<Vec<String>>>) -> Option<Option<String>> {
    value.map(|list| encode_list(list.as_deref()))
}

impl From<SpacePatch> for SpaceChanges {
    /// Explicit nulls on non-nullable fields are rejected during validation,
    /// so they collapse to "unchanged" here.
    fn from(patch: SpacePatch) -> Self {
        SpaceChanges {
            title: patch.title.flatten(),
            description: patch.description.flatten(),
            space_type: patch.space_type.flatten(),
            location: patch.location.flatten(),
            address: patch.address.flatten(),
            city: patch.city.flatten(),
            state: patch.state.flatten(),
            zip_code: patch.zip_code.flatten(),
            country: patch.country.flatten(),
            price_per_hour: patch.price_per_hour,
            price_per_day: patch.price_per_day,
            price_per_week: patch.price_per_week,
            price_per_month: patch.price_per_month,
            area_sqft: patch.area_sqft,
            max_capacity: patch.max_capacity,
            amenities: encode_list_patch(patch.amenities),
            is_available: patch.is_available.flatten(),
            available_from: patch.available_from,
            available_until: patch.available_until,
            photos: encode_list_patch(patch.photos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_amenities(raw: Option<&str>) -> SpaceRow {
        let now = chrono::Utc::now();
        SpaceRow {
            id: 1,
            title: "Dry Basement".to_string(),
            description: "Clean basement storage with a dehumidifier.".to_string(),
            space_type: "basement".to_string(),
            location: "Fremont".to_string(),
            address: "789 Elm Street".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            zip_code: "98103".to_string(),
            country: "US".to_string(),
            price_per_hour: Some(10.0),
            price_per_day: None,
            price_per_week: None,
            price_per_month: None,
            area_sqft: None,
            max_capacity: None,
            amenities: raw.map(str::to_string),
            is_available: true,
            available_from: None,
            available_until: None,
            photos: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_decodes_list_columns() {
        let space = Space::from(row_with_amenities(Some(r#"["WiFi","Lighting"]"#)));
        assert_eq!(space.amenities, vec!["WiFi", "Lighting"]);
        assert!(space.photos.is_empty());
    }

    #[test]
    fn corrupted_list_column_becomes_empty() {
        let space = Space::from(row_with_amenities(Some("not json")));
        assert!(space.amenities.is_empty());
        assert_eq!(space.title, "Dry Basement");
    }

    #[test]
    fn list_patch_encoding() {
        assert_eq!(encode_list_patch(None), None);
        assert_eq!(encode_list_patch(Some(None)), Some(None));
        assert_eq!(encode_list_patch(Some(Some(vec![]))), Some(None));
        assert_eq!(
            encode_list_patch(Some(Some(vec!["Lock".to_string()]))),
            Some(Some(r#"["Lock"]"#.to_string()))
        );
    }

    #[test]
    fn patch_maps_to_changes() {
        let patch: SpacePatch = serde_json::from_value(serde_json::json!({
            "city": "Tacoma",
            "price_per_day": null,
            "photos": ["https://example.com/a.jpg"]
        }))
        .unwrap();
        let changes = SpaceChanges::from(patch);
        assert_eq!(changes.city.as_deref(), Some("Tacoma"));
        assert_eq!(changes.title, None);
        assert_eq!(changes.price_per_day, Some(None));
        assert_eq!(changes.price_per_hour, None);
        assert_eq!(
            changes.photos,
            Some(Some(r#"["https://example.com/a.jpg"]"#.to_string()))
        );
    }
}
