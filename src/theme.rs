// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Theme preference persistence and initial theme resolution.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    error::{Error, io_error},
    sanitizer::ThemeConfig,
};

/// Key under which the selected theme is stored.
pub const THEME_STORAGE_KEY: &str = "gitfolio-theme";

/// Default location of the theme preference file.
pub const DEFAULT_THEME_STORE: &str = ".gitfolio-theme.json";

/// Storage for the single persisted theme preference.
pub trait ThemePersistence
{
    /// Returns the stored theme name, if any.
    fn get(&self,) -> Option<String,>;

    /// Stores a theme name, replacing the previous one.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the preference cannot be written.
    fn set(&self, theme: &str,) -> Result<(), Error,>;
}

/// Theme preference kept in a small JSON object file.
///
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone,)]
pub struct FileThemeStore
{
    path: PathBuf,
}

impl FileThemeStore
{
    pub fn new(path: impl Into<PathBuf,>,) -> Self
    {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self,) -> &Path
    {
        &self.path
    }

    fn read_entries(&self,) -> Result<Map<String, Value,>, Error,>
    {
        let contents = match fs::read_to_string(&self.path,) {
            Ok(contents,) => contents,
            Err(source,) if source.kind() == ErrorKind::NotFound => return Ok(Map::new(),),
            Err(source,) => return Err(io_error(&self.path, source,),),
        };
        match serde_json::from_str::<Value,>(&contents,)? {
            Value::Object(entries,) => Ok(entries,),
            _ => Err(Error::validation(format!(
                "theme store {} does not contain a JSON object",
                self.path.display()
            ),),),
        }
    }
}

impl ThemePersistence for FileThemeStore
{
    fn get(&self,) -> Option<String,>
    {
        match self.read_entries() {
            Ok(entries,) => entries.get(THEME_STORAGE_KEY,).and_then(Value::as_str,).map(str::to_owned,),
            Err(error,) => {
                warn!("Ignoring unreadable theme store: {}", error);
                None
            }
        }
    }

    fn set(&self, theme: &str,) -> Result<(), Error,>
    {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(THEME_STORAGE_KEY.to_owned(), Value::String(theme.to_owned(),),);
        let document = serde_json::to_string_pretty(&Value::Object(entries,),)?;
        fs::write(&self.path, document,).map_err(|source| io_error(&self.path, source,),)?;
        debug!("Persisted theme {} to {}", theme, self.path.display());
        Ok((),)
    }
}

/// In-memory theme preference, for tests and embedding.
#[derive(Debug, Default,)]
pub struct MemoryThemeStore
{
    theme: Mutex<Option<String,>,>,
}

impl MemoryThemeStore
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Creates a store that already holds `theme`.
    pub fn with_theme(theme: &str,) -> Self
    {
        Self {
            theme: Mutex::new(Some(theme.to_owned(),),),
        }
    }
}

impl ThemePersistence for MemoryThemeStore
{
    fn get(&self,) -> Option<String,>
    {
        self.theme.lock().unwrap_or_else(PoisonError::into_inner,).clone()
    }

    fn set(&self, theme: &str,) -> Result<(), Error,>
    {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner,) = Some(theme.to_owned(),);
        Ok((),)
    }
}

/// Resolves the theme shown when the page mounts.
///
/// With the switch disabled the configured default always wins. Otherwise a
/// stored preference is used when it names a known theme, then the system
/// color-scheme hint (`prefers_dark`) when the configuration opts into it and
/// the matching `dark`/`light` theme exists.
pub fn initial_theme(
    config: &ThemeConfig,
    store: &dyn ThemePersistence,
    prefers_dark: Option<bool,>,
) -> String
{
    if config.disable_switch {
        return config.default_theme.clone();
    }

    if let Some(stored,) = store.get() {
        if is_known(config, &stored,) {
            return stored;
        }
        debug!("Ignoring stored theme {} that is not configured", stored);
    }

    if config.respect_prefers_color_scheme {
        let hinted = prefers_dark.map(|dark| if dark { "dark" } else { "light" },);
        if let Some(hinted,) = hinted.filter(|name| is_known(config, name,),) {
            return hinted.to_owned();
        }
    }

    config.default_theme.clone()
}

/// Validates and persists a theme chosen by the user.
///
/// # Errors
///
/// Returns [`Error::Validation`] when `theme` is not one of the configured
/// themes, or the store's error when persisting fails.
pub fn change_theme(
    config: &ThemeConfig,
    store: &dyn ThemePersistence,
    theme: &str,
) -> Result<String, Error,>
{
    let theme = theme.trim();
    if !is_known(config, theme,) {
        return Err(Error::validation(format!("unknown theme '{theme}'"),),);
    }
    store.set(theme,)?;
    Ok(theme.to_owned(),)
}

fn is_known(config: &ThemeConfig, theme: &str,) -> bool
{
    config.themes.iter().any(|known| known == theme,)
}

#[cfg(test)]
mod tests
{
    use tempfile::tempdir;

    use super::{
        FileThemeStore, MemoryThemeStore, THEME_STORAGE_KEY, ThemePersistence, change_theme,
        initial_theme,
    };
    use crate::{error::Error, sanitizer::ThemeConfig};

    fn config() -> ThemeConfig
    {
        ThemeConfig {
            default_theme:                "lofi".to_owned(),
            disable_switch:               false,
            respect_prefers_color_scheme: false,
            display_avatar_ring:          true,
            themes:                       vec!["lofi".to_owned(), "dark".to_owned(), "light".to_owned()],
        }
    }

    #[test]
    fn stored_known_theme_wins()
    {
        let store = MemoryThemeStore::with_theme("dark",);
        assert_eq!(initial_theme(&config(), &store, Some(false),), "dark");
    }

    #[test]
    fn disabled_switch_always_uses_default()
    {
        let mut config = config();
        config.disable_switch = true;
        let store = MemoryThemeStore::with_theme("dark",);
        assert_eq!(initial_theme(&config, &store, Some(true),), "lofi");
    }

    #[test]
    fn unknown_stored_theme_is_ignored()
    {
        let store = MemoryThemeStore::with_theme("neon",);
        assert_eq!(initial_theme(&config(), &store, None,), "lofi");
    }

    #[test]
    fn color_scheme_hint_requires_opt_in()
    {
        let store = MemoryThemeStore::new();
        assert_eq!(initial_theme(&config(), &store, Some(true),), "lofi");

        let mut config = config();
        config.respect_prefers_color_scheme = true;
        assert_eq!(initial_theme(&config, &store, Some(true),), "dark");
        assert_eq!(initial_theme(&config, &store, Some(false),), "light");
        assert_eq!(initial_theme(&config, &store, None,), "lofi");
    }

    #[test]
    fn change_theme_rejects_unknown_names()
    {
        let store = MemoryThemeStore::new();
        let error = change_theme(&config(), &store, "neon",).expect_err("unknown theme",);
        assert!(matches!(error, Error::Validation { .. }));
        assert!(store.get().is_none());

        let chosen = change_theme(&config(), &store, " dark ",).expect("known theme",);
        assert_eq!(chosen, "dark");
        assert_eq!(store.get().as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_round_trips_and_preserves_other_keys()
    {
        let dir = tempdir().expect("failed to create temp dir",);
        let path = dir.path().join("prefs.json",);
        std::fs::write(&path, r#"{"other": 1}"#,).expect("failed to seed store",);

        let store = FileThemeStore::new(&path,);
        store.set("light",).expect("failed to persist theme",);
        assert_eq!(store.get().as_deref(), Some("light"));

        let contents = std::fs::read_to_string(&path,).expect("failed to read store",);
        let document: serde_json::Value = serde_json::from_str(&contents,).expect("valid json",);
        assert_eq!(document["other"], 1);
        assert_eq!(document[THEME_STORAGE_KEY], "light");
    }

    #[test]
    fn missing_or_corrupt_file_reads_as_unset()
    {
        let dir = tempdir().expect("failed to create temp dir",);
        let store = FileThemeStore::new(dir.path().join("absent.json",),);
        assert!(store.get().is_none());

        let corrupt = dir.path().join("corrupt.json",);
        std::fs::write(&corrupt, "[1, 2",).expect("failed to seed store",);
        assert!(FileThemeStore::new(&corrupt,).get().is_none());
    }
}
