//! Key-value settings kept apart from the name list
//!
//! Holds UI preferences such as the last terminal size and the dark mode
//! flag. Keys this build does not know about are kept on rewrite.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const WINDOW_SIZE_KEY: &str = "window_size";
pub const DARK_MODE_KEY: &str = "dark_mode";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a settings object: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Terminal size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
}

/// File-backed settings map
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsStore {
    /// Open the settings at `path`; a missing file means no settings yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        Ok(SettingsStore { path, values })
    }

    /// Typed lookup. Missing keys and values of the wrong shape both yield `None`.
    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.values.get(key)?;
        match serde_json::from_value(raw.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring setting with unexpected shape");
                None
            }
        }
    }

    /// Store `value` under `key` and write the file
    pub fn set_value<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        self.values.insert(key.to_string(), value);
        self.save()
    }

    pub fn window_size(&self) -> Option<WindowSize> {
        self.value(WINDOW_SIZE_KEY)
    }

    pub fn set_window_size(&mut self, size: WindowSize) -> Result<()> {
        self.set_value(WINDOW_SIZE_KEY, size)
    }

    pub fn dark_mode(&self) -> bool {
        self.value(DARK_MODE_KEY).unwrap_or(false)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.set_value(DARK_MODE_KEY, enabled)
    }

    fn save(&self) -> Result<()> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_has_defaults() {
        let dir = tempdir().unwrap();
        let settings = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.window_size(), None);
        assert!(!settings.dark_mode());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = SettingsStore::open(&path).unwrap();
        settings.set_window_size(WindowSize { cols: 100, rows: 40 }).unwrap();
        settings.set_dark_mode(true).unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.window_size(), Some(WindowSize { cols: 100, rows: 40 }));
        assert!(reopened.dark_mode());
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"window_pos": [10, 20]}"#).unwrap();

        let mut settings = SettingsStore::open(&path).unwrap();
        settings.set_dark_mode(true).unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.value::<Vec<u32>>("window_pos"), Some(vec![10, 20]));
    }

    #[test]
    fn test_wrong_shape_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"window_size": "huge", "dark_mode": 3}"#).unwrap();

        let settings = SettingsStore::open(&path).unwrap();
        assert_eq!(settings.window_size(), None);
        assert!(!settings.dark_mode());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(SettingsStore::open(&path), Err(SettingsError::Json { .. })));
    }
}
