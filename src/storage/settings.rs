//! Settings storage
//!
//! Manages persistence of application settings.

use crate::storage::{get_data_dir, StorageError, CHATS_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Sender label stamped on messages written by the local user
    #[serde(default = "default_local_user_label")]
    pub local_user_label: String,
    /// Avatar generator used for new conversations
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,
    /// Slot holding the conversation list
    #[serde(default = "default_chats_key")]
    pub chats_key: String,
    /// Directory holding the key-value slots (defaults to the data directory)
    #[serde(default)]
    pub slots_dir: Option<PathBuf>,
}

fn default_local_user_label() -> String {
    "Me".to_string()
}

fn default_avatar_base_url() -> String {
    "https://ui-avatars.com/api/".to_string()
}

fn default_chats_key() -> String {
    CHATS_KEY.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            local_user_label: default_local_user_label(),
            avatar_base_url: default_avatar_base_url(),
            chats_key: default_chats_key(),
            slots_dir: None,
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Replaces blank or malformed values with their defaults.
    pub fn validate(&mut self) {
        if self.local_user_label.trim().is_empty() {
            self.local_user_label = default_local_user_label();
        }

        if url::Url::parse(&self.avatar_base_url).is_err() {
            tracing::warn!(
                "Invalid avatar base URL '{}', using default",
                self.avatar_base_url
            );
            self.avatar_base_url = default_avatar_base_url();
        }

        let key_ok = !self.chats_key.is_empty()
            && self
                .chats_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !key_ok {
            self.chats_key = default_chats_key();
        }
    }
}

/// Get the settings file path
pub fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from the data directory
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            tracing::warn!("Failed to locate settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Load settings from a specific file, falling back to defaults
pub fn load_settings_from(path: &Path) -> AppSettings {
    match load_settings_internal(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

fn load_settings_internal(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to a file
pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
