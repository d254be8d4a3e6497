//! Record types persisted by the stores.
//!
//! Stored records are read leniently: a declared field whose value has an
//! unexpected shape, and any key outside the declared field set, is kept
//! verbatim in the record's `extra` map and written back unchanged.

pub mod character;
pub mod place;

pub use character::{Character, CharacterFields};
pub use place::{Chapter, Place, PlaceFields};

use lorebook_core::types::RecordId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys of a stored record that are not part of its declared field set.
pub type Extra = Map<String, Value>;

/// Remove and return the record id. Only the id is required to be well formed.
pub(crate) fn take_id(map: &mut Extra) -> Result<RecordId, String> {
    let value = map.remove("id").ok_or("record has no id")?;
    value
        .as_u64()
        .ok_or_else(|| format!("record id must be a non-negative integer, got {value}"))
}

/// Take `key` out of `map` if its value deserializes as `T`.
///
/// On a mismatch the value stays in `map` untouched and `None` is returned.
pub(crate) fn take_field<T: DeserializeOwned>(map: &mut Extra, key: &str) -> Option<T> {
    let value = map.remove(key)?;
    match T::deserialize(&value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            map.insert(key.to_string(), value);
            None
        }
    }
}
