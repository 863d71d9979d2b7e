use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Store, StoreError};

/// Decode the JSON value stored under `key`.
///
/// Returns `None` for a missing key and for a value that does not decode as
/// `T`; the latter is logged and otherwise swallowed so callers can fall back
/// to their default.
pub fn read_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "Malformed stored data, using default: {}", e);
            None
        }
    }
}

/// Encode `value` as JSON and write it under `key` in one `set`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, encoded)
}
