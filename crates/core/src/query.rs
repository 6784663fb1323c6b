//! Filter set and pagination for listing spaces.

use serde::Deserialize;
use validator::Validate;

use crate::error::{CoreError, FieldErrors};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest requestable page; keeps `offset()` far inside `i64`.
pub const MAX_PAGE: i64 = 1_000_000;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

/// Optional filters plus the requested page (`GET /spaces?...`).
///
/// Absent filters impose no constraint. `min_price` / `max_price` bound the
/// hourly price only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SpaceQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1_000_000, message = "must be between 1 and 1000000"))]
    pub page: i64,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub per_page: i64,
    pub space_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(range(min = 0.0, message = "must be at least 0"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must be at least 0"))]
    pub max_price: Option<f64>,
    pub is_available: Option<bool>,
    pub search: Option<String>,
}

impl Default for SpaceQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            space_type: None,
            city: None,
            state: None,
            min_price: None,
            max_price: None,
            is_available: None,
            search: None,
        }
    }
}

/// Drop empty strings so `?city=` behaves like an absent filter.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SpaceQuery {
    /// Check page bounds and price bounds, lowercase the type filter and
    /// treat empty text filters as absent.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        if let Err(e) = self.validate() {
            return Err(CoreError::Validation(FieldErrors::from(e)));
        }
        self.space_type = non_empty(self.space_type).map(|t| t.to_lowercase());
        self.city = non_empty(self.city);
        self.state = non_empty(self.state);
        self.search = non_empty(self.search);
        Ok(self)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Rows skipped before the requested page: `(page - 1) * per_page`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Number of pages needed for `total` rows; zero when there are no rows.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}
