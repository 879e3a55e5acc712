//! Update fields that can also clear a nullable column.
//!
//! An absent field keeps the stored value, `null` clears it, anything else
//! replaces it. Repositories bind two parameters per field, [`is_set`] as
//! the flag of a `CASE WHEN $flag THEN $value ELSE col END` and the value
//! itself.

use serde::{Deserialize, Deserializer};
use sitedesk_core::validation::trimmed_opt;

/// `None` when absent, `Some(None)` for an explicit `null`.
pub type Nullable<T> = Option<Option<T>>;

/// `deserialize_with` target for [`Nullable`] fields. Pair it with
/// `#[serde(default)]` so a missing field stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn is_set<T>(field: &Nullable<T>) -> bool {
    field.is_some()
}

/// Trimmed replacement text. Blank text clears the column, as it stores
/// `NULL` on create.
pub fn text(field: &Nullable<String>) -> Option<String> {
    field
        .as_ref()
        .and_then(|value| trimmed_opt(value.as_deref()))
}
