//! Tri-state fields for partial updates.
//!
//! A JSON patch body distinguishes three cases per field: the key is absent
//! (leave the stored value alone), the key is `null` (clear it), or the key
//! carries a value (overwrite). Plain `Option<Option<T>>` collapses the first
//! two, so patch DTOs pair it with [`deserialize_present`]:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "crate::patch::deserialize_present")]
//! pub price_per_day: Option<Option<f64>>,
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize a key that is known to be present.
///
/// Only invoked by serde when the key exists, so the result is always the
/// outer `Some`; `#[serde(default)]` supplies `None` for missing keys.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolve a tri-state patch field against the current value.
pub fn apply<T: Clone>(patch: &Option<Option<T>>, current: &Option<T>) -> Option<T> {
    match patch {
        Some(next) => next.clone(),
        None => current.clone(),
    }
}
