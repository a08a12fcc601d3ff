//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.quizbadge/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quizbadge")
    }

    /// Get the global config file path (~/.quizbadge/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// The exclusive lock keeps two processes from writing at once; the temp
    /// file + rename keeps a crash from leaving a half-written config.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let _lock = acquire_lock(path)?;
        write_atomic(path, &content)
        // Lock is released when _lock is dropped
    }

    /// Load global configuration from ~/.quizbadge/config.toml,
    /// creating it with defaults if it does not exist yet.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();
        Self::load_or_init(&global_path)
    }

    /// Load configuration from `path`, writing defaults there first if missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::init_at(path, false)?;
        }
        Self::from_file(path)
    }

    /// Write a default configuration to `path`.
    ///
    /// Returns `false` without touching the file if it already exists and
    /// `force` is not set.
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        let _lock = acquire_lock(path)?;

        // Re-check after acquiring the lock (another process may have created it)
        if path.exists() && !force {
            return Ok(false);
        }

        let content = toml::to_string_pretty(&Self::default())
            .with_context(|| "Failed to serialize default config")?;
        write_atomic(path, &content)?;

        tracing::info!("Created {}", path.display());
        Ok(true)
    }
}

/// Create the parent dir and take an exclusive lock next to the config file
fn acquire_lock(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    // Separate lock file so the rename below never replaces a locked inode
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}
