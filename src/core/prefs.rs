//! Persisted UI preferences.
//!
//! A single theme value ("light"/"dark") stored as TOML under the user
//! config directory. Read once at startup, written on toggle. Any failure
//! falls back to the default with a logged warning — preferences are never
//! worth an error state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The persisted theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePref {
    #[default]
    Dark,
    Light,
}

impl ThemePref {
    /// Parse a stored value. Unknown strings coerce to the default.
    pub fn parse(value: &str) -> ThemePref {
        match value {
            "light" => ThemePref::Light,
            _ => ThemePref::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePref::Dark => "dark",
            ThemePref::Light => "light",
        }
    }

    pub fn toggled(self) -> ThemePref {
        match self {
            ThemePref::Dark => ThemePref::Light,
            ThemePref::Light => ThemePref::Dark,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    theme: String,
}

/// File-backed preference store.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `~/.config/predex/prefs.toml`.
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .map(|d| d.join("predex").join("prefs.toml"))
            .unwrap_or_else(|| PathBuf::from("prefs.toml"));
        Self::new(path)
    }

    /// Read the stored theme. Missing or unparseable files yield the
    /// default.
    pub fn load_theme(&self) -> ThemePref {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match toml::from_str::<PrefsFile>(&contents) {
                Ok(prefs) => ThemePref::parse(&prefs.theme),
                Err(e) => {
                    log::warn!(
                        "Failed to parse prefs at {}: {e} — using default theme",
                        self.path.display()
                    );
                    ThemePref::default()
                }
            },
            Err(_) => ThemePref::default(),
        }
    }

    /// Persist the theme. Failures are logged and otherwise ignored.
    pub fn save_theme(&self, theme: ThemePref) {
        let prefs = PrefsFile {
            theme: theme.as_str().to_string(),
        };
        let contents = match toml::to_string(&prefs) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Failed to serialize prefs: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create prefs directory: {e}");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, contents) {
            log::warn!("Failed to write prefs to {}: {e}", self.path.display());
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coerces_unknown_to_dark() {
        assert_eq!(ThemePref::parse("light"), ThemePref::Light);
        assert_eq!(ThemePref::parse("dark"), ThemePref::Dark);
        assert_eq!(ThemePref::parse("solarized"), ThemePref::Dark);
        assert_eq!(ThemePref::parse(""), ThemePref::Dark);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemePref::Dark.toggled(), ThemePref::Light);
        assert_eq!(ThemePref::Light.toggled(), ThemePref::Dark);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.toml"));
        store.save_theme(ThemePref::Light);
        assert_eq!(store.load_theme(), ThemePref::Light);
        store.save_theme(ThemePref::Dark);
        assert_eq!(store.load_theme(), ThemePref::Dark);
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("nope.toml"));
        assert_eq!(store.load_theme(), ThemePref::Dark);
    }

    #[test]
    fn test_garbage_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let store = PrefsStore::new(path);
        assert_eq!(store.load_theme(), ThemePref::Dark);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("nested").join("prefs.toml"));
        store.save_theme(ThemePref::Light);
        assert_eq!(store.load_theme(), ThemePref::Light);
    }
}
