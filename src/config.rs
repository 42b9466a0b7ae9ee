//! Runtime configuration - where the data, settings and logs live

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DIR_NAME, HOME_ENV_VAR, NAMES_FILE, SETTINGS_FILE};

/// Resolved file locations for one run of the applications
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Build a config rooted at an explicit directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from `JUMPSTART_HOME`, falling back to
    /// `~/.jumpstart`, then to the working directory.
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(HOME_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(DEFAULT_DIR_NAME)
            });

        Config { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn names_path(&self) -> PathBuf {
        self.data_dir.join(NAMES_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}
