use serde::{Deserialize, Serialize};
use tg_store::{write_json, Store, StoreError, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference, or `Light`. Accepts both the JSON form (`"dark"`)
    /// and a bare legacy value (`dark`).
    pub fn load(store: &dyn Store) -> Self {
        let Some(raw) = store.get(THEME_KEY) else {
            return Theme::default();
        };
        if let Ok(theme) = serde_json::from_str::<Theme>(&raw) {
            return theme;
        }
        match raw.trim() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            other => {
                tracing::warn!(value = other, "Unknown stored theme, using light");
                Theme::default()
            }
        }
    }

    pub fn save(&self, store: &dyn Store) -> Result<(), StoreError> {
        write_json(store, THEME_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_store::MemoryStore;

    #[test]
    fn defaults_to_light() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn save_writes_json_string() {
        let store = MemoryStore::new();
        Theme::Dark.save(&store).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("\"dark\""));
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn accepts_bare_legacy_value() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "dark".to_string()).unwrap();
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn unknown_value_falls_back() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "\"sepia\"".to_string()).unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
