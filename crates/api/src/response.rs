//! Response payload types shared by API handlers.

use serde::Serialize;
use space_rental_core::space::Space;

/// One page of spaces with pagination metadata.
///
/// `total` counts every match, not just this page. `total_pages` is `0` when
/// nothing matches.
#[derive(Debug, Serialize)]
pub struct SpaceListResponse {
    pub spaces: Vec<Space>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}
