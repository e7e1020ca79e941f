use crate::shared::paths::{ensure_dir, get_default_data_file, get_storage_dir};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATA_FILE_ENV: &str = "TASKLIST_DATA_FILE";
pub const BIND_ENV: &str = "TASKLIST_BIND";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Task document location; `None` means `<data dir>/todos.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_file: None,
            bind_address: default_bind_address(),
        }
    }
}

impl AppSettings {
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(get_default_data_file)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_address
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddress(self.bind_address.clone()))
    }

    /// Applies environment overrides. Empty values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = Some(PathBuf::from(path.trim()));
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_address = bind.trim().to_string();
        }
        self
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
}

fn get_settings_path() -> PathBuf {
    get_storage_dir().join("settings.json")
}

/// Loads `settings.json` and the environment overrides.
pub fn load_settings() -> AppSettings {
    load_settings_at(&get_settings_path()).apply_overrides(|key| std::env::var(key).ok())
}

/// Missing file yields defaults; a broken one is logged and ignored.
pub fn load_settings_at(path: &Path) -> AppSettings {
    if !path.exists() {
        return AppSettings::default();
    }

    match load_settings_from_file(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                target: "system",
                path = %path.display(),
                "Ignoring settings file: {}",
                e
            );
            AppSettings::default()
        }
    }
}

fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

/// Writes default settings on first run so there is a file to edit.
pub fn init_settings_file() -> Result<bool, SettingsError> {
    init_settings_file_at(&get_settings_path())
}

/// Returns whether a new file was written; an existing one is left alone.
pub fn init_settings_file_at(path: &Path) -> Result<bool, SettingsError> {
    if path.exists() {
        return Ok(false);
    }
    save_settings_at(path, &AppSettings::default())?;
    Ok(true)
}

pub fn save_settings_at(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, contents)?;
    Ok(())
}
