use std::path::{Path, PathBuf};

/// Holds a configurable base directory for everything touchgrass keeps on disk.
///
/// Use `ConfigPaths::new()` for normal runs (resolves `~/.touchgrass`),
/// or `ConfigPaths::with_base()` for testing with an isolated directory.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    base: PathBuf,
}

impl ConfigPaths {
    /// Create paths rooted at `~/.touchgrass`. Returns an error if the home
    /// directory cannot be determined.
    pub fn new() -> anyhow::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(Self {
            base: home.join(".touchgrass"),
        })
    }

    /// Create paths rooted at a custom base directory (useful for tests).
    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn config_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    /// Location of the durable key-value store file.
    pub fn store_path(&self, file_name: &str) -> PathBuf {
        self.base.join(file_name)
    }

    /// Ensure the config directory exists, creating it if necessary.
    pub fn ensure_config_dir(&self) -> anyhow::Result<PathBuf> {
        if !self.base.exists() {
            std::fs::create_dir_all(&self.base)?;
        }
        Ok(self.base.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_returns_base_path() {
        let paths = ConfigPaths::with_base(PathBuf::from("/tmp/test-tg"));
        assert_eq!(paths.config_dir(), Path::new("/tmp/test-tg"));
    }

    #[test]
    fn path_accessors_return_expected_filenames() {
        let base = PathBuf::from("/base");
        let paths = ConfigPaths::with_base(base.clone());

        assert_eq!(paths.config_path(), base.join("config.toml"));
        assert_eq!(paths.store_path("store.json"), base.join("store.json"));
        assert_eq!(paths.store_path("other.json"), base.join("other.json"));
    }

    #[test]
    fn ensure_config_dir_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").join("config");
        let paths = ConfigPaths::with_base(base.clone());

        assert!(!base.exists());
        let result = paths.ensure_config_dir().unwrap();
        assert_eq!(result, base);
        assert!(base.exists());
    }

    #[test]
    fn ensure_config_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::with_base(dir.path().join("config"));

        paths.ensure_config_dir().unwrap();
        paths.ensure_config_dir().unwrap();
    }

    #[test]
    fn new_resolves_under_home() {
        if let Ok(paths) = ConfigPaths::new() {
            assert!(paths.config_dir().ends_with(".touchgrass"));
        }
    }
}
