use serde::{Deserialize, Serialize};

/// Roughly what a browser grants one origin for local storage.
pub const DEFAULT_CAPACITY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: usize,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_capacity_bytes() -> usize {
    DEFAULT_CAPACITY_BYTES
}

fn default_file_name() -> String {
    "store.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: default_capacity_bytes(),
            file_name: default_file_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let store = StoreConfig::default();
        assert_eq!(store.capacity_bytes, 5 * 1024 * 1024);
        assert_eq!(store.file_name, "store.json");
    }

    #[test]
    fn serde_missing_fields_uses_defaults() {
        let store: StoreConfig = toml::from_str("capacity_bytes = 1024\n").unwrap();
        assert_eq!(store.capacity_bytes, 1024);
        assert_eq!(store.file_name, "store.json");
    }
}
