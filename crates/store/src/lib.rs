//! In-memory resource stores for items and users.
//!
//! Nothing survives a restart. Each repository owns one insertion-ordered
//! map behind a `tokio::sync::RwLock`; mutations hold the write lock for the
//! whole check-then-write sequence.

pub mod models;
pub mod repositories;

use scada_core::error::CoreError;
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Largest page a list endpoint will return.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Page size used when the caller does not pass `limit`.
pub fn default_page_limit() -> usize {
    MAX_PAGE_LIMIT
}

/// Run `validator` rules on a DTO and fold any failure into [`CoreError`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

/// Deserializer for nullable patch fields.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on an
/// `Option<Option<T>>`: an absent key stays `None`, an explicit `null`
/// becomes `Some(None)` and clears the stored value.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Apply `skip` / `limit` to an already-filtered iterator.
pub(crate) fn paginate<T>(items: impl Iterator<Item = T>, skip: usize, limit: usize) -> Vec<T> {
    items.skip(skip).take(limit).collect()
}
