//! Configuration loading and management

mod io;
mod settings;

pub use settings::{Settings, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Storage location
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Path of the storage database, falling back to the global config dir
    pub fn storage_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("storage.db"))
    }

    /// Resolve the user for a command: explicit flag first, then the configured default
    pub fn resolve_user(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.settings
                    .default_user
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
            })
    }
}
