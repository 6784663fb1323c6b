//! The Space entity: a rentable physical location listing.
//!
//! Holds the plain record returned to callers, the create and patch inputs,
//! and every rule those inputs must satisfy before they reach storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateLength, ValidateRange};

use crate::error::{CoreError, FieldErrors};
use crate::patch::{self, deserialize_present};
use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Space";

/// Country stored when the create input omits one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Exclusive upper bound on any price; the column is `NUMERIC(10, 2)`.
pub const MAX_PRICE: f64 = 100_000_000.0;

const PRICE_RANGE_MESSAGE: &str = "must be greater than 0 and less than 100000000";
const PRICE_SCALE_MESSAGE: &str = "must have at most 2 decimal places";

/// Whether a finite price is expressible in whole cents.
fn is_whole_cents(price: f64) -> bool {
    let cents = price * 100.0;
    (cents - cents.round()).abs() < 1e-4
}

/// Record a scale error for a price with more than two decimal places.
fn check_cents(errors: &mut FieldErrors, field: &str, price: Option<f64>) {
    if let Some(price) = price {
        if price.is_finite() && !is_whole_cents(price) {
            errors.push(field, PRICE_SCALE_MESSAGE);
        }
    }
}

// ---------------------------------------------------------------------------
// Space type
// ---------------------------------------------------------------------------

/// Kind of space being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    Garage,
    Backyard,
    Basement,
    Attic,
    Warehouse,
    ParkingSpace,
    Other,
}

impl SpaceType {
    pub const ALL: [SpaceType; 7] = [
        SpaceType::Garage,
        SpaceType::Backyard,
        SpaceType::Basement,
        SpaceType::Attic,
        SpaceType::Warehouse,
        SpaceType::ParkingSpace,
        SpaceType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpaceType::Garage => "garage",
            SpaceType::Backyard => "backyard",
            SpaceType::Basement => "basement",
            SpaceType::Attic => "attic",
            SpaceType::Warehouse => "warehouse",
            SpaceType::ParkingSpace => "parking_space",
            SpaceType::Other => "other",
        }
    }

    /// Parse a space type, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == lowered)
    }

    /// Comma-separated list of accepted values, sorted alphabetically.
    pub fn allowed_values() -> String {
        let mut names: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a submitted space type to its lowercase form, or record an error.
fn normalize_space_type(value: &str, errors: &mut FieldErrors) -> Option<String> {
    match SpaceType::parse(value) {
        Some(t) => Some(t.as_str().to_string()),
        None => {
            errors.push(
                "space_type",
                format!("must be one of: {}", SpaceType::allowed_values()),
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Price tiers
// ---------------------------------------------------------------------------

/// The four billing granularities. Exactly one may be active per space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceTiers {
    pub per_hour: Option<f64>,
    pub per_day: Option<f64>,
    pub per_week: Option<f64>,
    pub per_month: Option<f64>,
}

impl PriceTiers {
    /// Number of tiers that are set to a positive amount.
    pub fn active_count(&self) -> usize {
        [self.per_hour, self.per_day, self.per_week, self.per_month]
            .into_iter()
            .flatten()
            .filter(|p| p.is_finite() && *p > 0.0)
            .count()
    }

    /// Record a `prices` error unless exactly one tier is active.
    pub fn check(&self, errors: &mut FieldErrors) {
        if self.active_count() != 1 {
            errors.push(
                "prices",
                "exactly one of price_per_hour, price_per_day, price_per_week, \
                 price_per_month must be set",
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A fully materialized space as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
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
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,
    pub photos: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Space {
    pub fn prices(&self) -> PriceTiers {
        PriceTiers {
            per_hour: self.price_per_hour,
            per_day: self.price_per_day,
            per_week: self.price_per_week,
            per_month: self.price_per_month,
        }
    }
}

// ---------------------------------------------------------------------------
// Create input
// ---------------------------------------------------------------------------

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_true() -> bool {
    true
}

/// Input for creating a space.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSpace {
    #[validate(length(min = 5, max = 200, message = "must be between 5 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 20, max = 2000, message = "must be between 20 and 2000 characters"))]
    pub description: String,
    pub space_type: String,
    #[validate(length(min = 5, max = 200, message = "must be between 5 and 200 characters"))]
    pub location: String,
    #[validate(length(min = 10, max = 500, message = "must be between 10 and 500 characters"))]
    pub address: String,
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub city: String,
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub state: String,
    #[validate(length(min = 5, max = 20, message = "must be between 5 and 20 characters"))]
    pub zip_code: String,
    #[serde(default = "default_country")]
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub country: String,

    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 100_000_000.0,
        message = "must be greater than 0 and less than 100000000"
    ))]
    pub price_per_hour: Option<f64>,
    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 100_000_000.0,
        message = "must be greater than 0 and less than 100000000"
    ))]
    pub price_per_day: Option<f64>,
    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 100_000_000.0,
        message = "must be greater than 0 and less than 100000000"
    ))]
    pub price_per_week: Option<f64>,
    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 100_000_000.0,
        message = "must be greater than 0 and less than 100000000"
    ))]
    pub price_per_month: Option<f64>,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub area_sqft: Option<i32>,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,

    #[serde(default = "default_true")]
    pub is_available: bool,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,

    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

impl NewSpace {
    pub fn prices(&self) -> PriceTiers {
        PriceTiers {
            per_hour: self.price_per_hour,
            per_day: self.price_per_day,
            per_week: self.price_per_week,
            per_month: self.price_per_month,
        }
    }

    fn price_fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("price_per_hour", self.price_per_hour),
            ("price_per_day", self.price_per_day),
            ("price_per_week", self.price_per_week),
            ("price_per_month", self.price_per_month),
        ]
    }

    /// Check every constraint and normalize `space_type` to lowercase.
    ///
    /// All violations are reported together; nothing else is modified.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if let Some(normalized) = normalize_space_type(&self.space_type, &mut errors) {
            self.space_type = normalized;
        }
        for (field, price) in self.price_fields() {
            check_cents(&mut errors, field, price);
        }
        self.prices().check(&mut errors);

        errors.into_result()?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Patch input
// ---------------------------------------------------------------------------

/// Partial update for a space.
///
/// Each field is tri-state: `None` leaves the stored value untouched,
/// `Some(None)` clears it and `Some(Some(v))` overwrites it. Clearing is only
/// allowed on nullable columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpacePatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub space_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub country: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub price_per_hour: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub price_per_day: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub price_per_week: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub price_per_month: Option<Option<f64>>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub area_sqft: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub max_capacity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub amenities: Option<Option<Vec<String>>>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub is_available: Option<Option<bool>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub available_from: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub available_until: Option<Option<Timestamp>>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub photos: Option<Option<Vec<String>>>,
}

/// Length bounds for a text field, in characters.
fn check_length<V>(errors: &mut FieldErrors, field: &str, value: &V, min: Option<u64>, max: u64)
where
    V: ValidateLength<u64>,
{
    if !value.validate_length(min, Some(max), None) {
        let message = match min {
            Some(min) => format!("must be between {min} and {max} characters"),
            None => format!("must be at most {max} characters"),
        };
        errors.push(field, message);
    }
}

fn check_positive<T, V>(errors: &mut FieldErrors, field: &str, value: &V, zero: T)
where
    T: PartialEq + PartialOrd,
    V: ValidateRange<T>,
{
    if !value.validate_range(None, None, Some(zero), None) {
        errors.push(field, "must be greater than 0");
    }
}

/// A price must be positive, below [`MAX_PRICE`] and in whole cents.
fn check_price(errors: &mut FieldErrors, field: &str, price: f64) {
    if !price.validate_range(None, None, Some(0.0), Some(MAX_PRICE)) {
        errors.push(field, PRICE_RANGE_MESSAGE);
    }
    check_cents(errors, field, Some(price));
}

/// A non-nullable text field: explicit `null` is rejected, a value is bounded.
fn check_required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &Option<Option<String>>,
    min: Option<u64>,
    max: u64,
) {
    match value {
        Some(None) => errors.push(field, "may not be null"),
        Some(Some(v)) => check_length(errors, field, v, min, max),
        None => {}
    }
}

impl SpacePatch {
    /// Whether any of the four price fields is mentioned.
    pub fn touches_prices(&self) -> bool {
        self.price_per_hour.is_some()
            || self.price_per_day.is_some()
            || self.price_per_week.is_some()
            || self.price_per_month.is_some()
    }

    /// Price tiers that would result from applying this patch to `current`.
    pub fn merged_prices(&self, current: &PriceTiers) -> PriceTiers {
        PriceTiers {
            per_hour: patch::apply(&self.price_per_hour, &current.per_hour),
            per_day: patch::apply(&self.price_per_day, &current.per_day),
            per_week: patch::apply(&self.price_per_week, &current.per_week),
            per_month: patch::apply(&self.price_per_month, &current.per_month),
        }
    }

    /// Check the field-level constraints of every present field and
    /// normalize `space_type` to lowercase.
    ///
    /// The price-tier rule depends on the stored record; see
    /// [`SpacePatch::check_prices_against`].
    pub fn validated(mut self) -> Result<Self, CoreError> {
        let mut errors = FieldErrors::new();

        check_required_text(&mut errors, "title", &self.title, Some(5), 200);
        check_required_text(&mut errors, "description", &self.description, Some(20), 2000);
        check_required_text(&mut errors, "location", &self.location, Some(5), 200);
        check_required_text(&mut errors, "address", &self.address, Some(10), 500);
        check_required_text(&mut errors, "city", &self.city, Some(2), 100);
        check_required_text(&mut errors, "state", &self.state, Some(2), 50);
        check_required_text(&mut errors, "zip_code", &self.zip_code, Some(5), 20);
        check_required_text(&mut errors, "country", &self.country, None, 50);

        self.space_type = match self.space_type.take() {
            Some(None) => {
                errors.push("space_type", "may not be null");
                Some(None)
            }
            Some(Some(v)) => Some(Some(normalize_space_type(&v, &mut errors).unwrap_or(v))),
            None => None,
        };

        if let Some(None) = self.is_available {
            errors.push("is_available", "may not be null");
        }

        for (field, value) in [
            ("price_per_hour", &self.price_per_hour),
            ("price_per_day", &self.price_per_day),
            ("price_per_week", &self.price_per_week),
            ("price_per_month", &self.price_per_month),
        ] {
            if let Some(Some(price)) = value {
                check_price(&mut errors, field, *price);
            }
        }

        for (field, value) in [
            ("area_sqft", &self.area_sqft),
            ("max_capacity", &self.max_capacity),
        ] {
            if let Some(Some(n)) = value {
                check_positive(&mut errors, field, n, 0);
            }
        }

        errors.into_result()?;
        Ok(self)
    }

    /// Enforce the single-active-tier rule on the record this patch produces.
    ///
    /// Only applies when the patch mentions a price field, so unrelated edits
    /// never fail because of the stored pricing.
    pub fn check_prices_against(&self, current: &PriceTiers) -> Result<(), CoreError> {
        if !self.touches_prices() {
            return Ok(());
        }
        let mut errors = FieldErrors::new();
        self.merged_prices(current).check(&mut errors);
        errors.into_result()
    }
}
