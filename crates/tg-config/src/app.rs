use serde::{Deserialize, Serialize};
use std::env;

use crate::paths::ConfigPaths;
use crate::store::StoreConfig;

fn default_host_marker() -> String {
    match env::var("TOUCHGRASS_HOST_MARKER") {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => "github.com".to_string(),
    }
}

fn default_agent_name_prefix() -> String {
    "Agent".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Substring a repository URL must contain to be accepted.
    #[serde(default = "default_host_marker")]
    pub host_marker: String,
    #[serde(default = "default_agent_name_prefix")]
    pub agent_name_prefix: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(skip)]
    paths: Option<ConfigPaths>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_marker: default_host_marker(),
            agent_name_prefix: default_agent_name_prefix(),
            store: StoreConfig::default(),
            log_filter: None,
            paths: None,
        }
    }
}

impl AppConfig {
    /// Returns the `ConfigPaths` for this config. If paths haven't been set,
    /// creates the default paths (may fail if `$HOME` is unset).
    pub fn paths(&self) -> anyhow::Result<ConfigPaths> {
        match &self.paths {
            Some(p) => Ok(p.clone()),
            None => ConfigPaths::new(),
        }
    }

    /// Load config from the default location (`~/.touchgrass/config.toml`).
    pub fn load() -> anyhow::Result<Self> {
        let paths = ConfigPaths::new()?;
        Self::load_from(&paths)
    }

    /// Load config from a specific `ConfigPaths`.
    pub fn load_from(paths: &ConfigPaths) -> anyhow::Result<Self> {
        let config_file = paths.config_path();
        let mut config = if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)?;
            let config: AppConfig = toml::from_str(&content)?;
            config
        } else {
            Self::default()
        };
        config.paths = Some(paths.clone());
        config.validate()?;
        Ok(config)
    }

    /// Validate config values. Called automatically by `load` / `load_from`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host_marker.trim().is_empty() {
            anyhow::bail!("host_marker must not be empty");
        }
        if self.agent_name_prefix.trim().is_empty() {
            anyhow::bail!("agent_name_prefix must not be empty");
        }
        if self.store.capacity_bytes == 0 {
            anyhow::bail!("store.capacity_bytes must be greater than 0");
        }
        if self.store.file_name.trim().is_empty() {
            anyhow::bail!("store.file_name must not be empty");
        }
        Ok(())
    }
}
