//! Synchronous, string-keyed durable storage.
//!
//! Values are JSON-encoded strings. Every `set` is durable before it returns;
//! there are no transactions and no batching.

pub mod file;
pub mod json;
pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

pub use file::FileStore;
pub use json::{read_json, write_json};
pub use memory::MemoryStore;

pub const PROJECTS_KEY: &str = "projects";
pub const LAST_PROJECT_KEY: &str = "lastProjectId";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed (capacity {capacity} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::QuotaExceeded { .. } => "STORE_QUOTA_EXCEEDED",
            StoreError::Serialize(_) => "STORE_SERIALIZE_ERROR",
            StoreError::Io(_) => "STORE_IO_ERROR",
        }
    }
}

pub trait Store: Send + Sync {
    /// Raw stored string for `key`, `None` when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn keys(&self) -> Vec<String>;

    /// Drop any cached view and re-read the backing medium. Needed to see
    /// writes made through another handle (another tab, another process).
    fn refresh(&self) {}
}

pub type SharedStore = Arc<dyn Store>;

/// Bytes `entries` would occupy once `key` holds `value`.
pub(crate) fn usage_with(entries: &HashMap<String, String>, key: &str, value: &str) -> usize {
    entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum::<usize>()
        + key.len()
        + value.len()
}

pub(crate) fn check_quota(
    entries: &HashMap<String, String>,
    key: &str,
    value: &str,
    capacity: usize,
) -> Result<(), StoreError> {
    let needed = usage_with(entries, key, value);
    if needed > capacity {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            capacity,
        });
    }
    Ok(())
}
