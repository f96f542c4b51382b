use crate::error::ConfigError;
use core_types::Theme;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Key under which the active theme is stored.
pub const THEME_KEY: &str = "theme";

/// A small persistent key-value store scoped to the current user.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        (**self).set(key, value)
    }
}

/// Where preferences live when no path is given, e.g.
/// `~/.config/return-triangle/preferences.json` on Linux.
pub fn default_preferences_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "return-triangle").map(|dirs| dirs.config_dir().join("preferences.json"))
}

/// Preferences kept as a flat JSON object in a single file. Keys this store
/// does not own may hold any JSON value and are left untouched.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Map<String, Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        // A corrupt file is replaced on write.
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(ConfigError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Preference file is corrupt, starting from an empty one"
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;

        tracing::debug!(path = %self.path.display(), key, value, "Preference written");
        Ok(())
    }
}

/// Preferences that only live as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The active theme, backed by a preference store.
///
/// Every change is written through to the store immediately.
#[derive(Debug)]
pub struct ThemeSettings<S: PreferenceStore> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeSettings<S> {
    /// Reads the stored theme. A missing, unreadable or unknown value falls
    /// back to the light theme.
    pub fn init(store: S) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(%value, "Unknown stored theme, falling back to light");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read preferences, falling back to light");
                Theme::default()
            }
        };
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches to the other theme and persists it.
    pub fn toggle(&mut self) -> Result<Theme, ConfigError> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), ConfigError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        tracing::info!(%theme, "Theme updated");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_when_nothing_is_stored() {
        let settings = ThemeSettings::init(MemoryPreferenceStore::new());
        assert_eq!(settings.theme(), Theme::Light);
    }

    #[test]
    fn reads_stored_theme() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(ThemeSettings::init(store).theme(), Theme::Dark);
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_light() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "neon").unwrap();
        assert_eq!(ThemeSettings::init(store).theme(), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut settings = ThemeSettings::init(MemoryPreferenceStore::new());

        assert_eq!(settings.toggle().unwrap(), Theme::Dark);
        assert_eq!(settings.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(settings.toggle().unwrap(), Theme::Light);
        assert_eq!(settings.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn file_store_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut settings = ThemeSettings::init(JsonFilePreferenceStore::new(&path));
        assert_eq!(settings.theme(), Theme::Light);
        settings.toggle().unwrap();
        assert!(path.exists());

        let reloaded = ThemeSettings::init(JsonFilePreferenceStore::new(&path));
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"language": "de"}"#).unwrap();

        let mut store = JsonFilePreferenceStore::new(&path);
        store.set(THEME_KEY, "dark").unwrap();

        assert_eq!(store.get("language").unwrap().as_deref(), Some("de"));
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert!(matches!(store.get(THEME_KEY), Err(ConfigError::Json(_))));
        assert_eq!(ThemeSettings::init(store).theme(), Theme::Light);
    }

    #[test]
    fn toggle_repairs_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let mut settings = ThemeSettings::init(JsonFilePreferenceStore::new(&path));
        assert_eq!(settings.toggle().unwrap(), Theme::Dark);

        let reloaded = ThemeSettings::init(JsonFilePreferenceStore::new(&path));
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn non_string_values_do_not_hide_the_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"theme": "dark", "fontSize": 14, "recent": ["sp500"]}"#).unwrap();

        let mut settings = ThemeSettings::init(JsonFilePreferenceStore::new(&path));
        assert_eq!(settings.theme(), Theme::Dark);

        settings.toggle().unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["theme"], "light");
        assert_eq!(written["fontSize"], 14);
        assert_eq!(written["recent"][0], "sp500");
    }

    #[test]
    fn non_string_theme_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"theme": 1}"#).unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        assert_eq!(ThemeSettings::init(store).theme(), Theme::Light);
    }
}
