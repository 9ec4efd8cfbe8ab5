//! Persistent storage
//!
//! This module handles all data persistence: the key-value slots holding
//! conversations, the user profile and preferences, plus application settings.

pub mod kv;
pub mod settings;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Key holding the serialized conversation list
pub const CHATS_KEY: &str = "chats_v10";
/// Key holding the serialized user profile
pub const USER_KEY: &str = "user";
/// Key holding the two-letter language code
pub const LANGUAGE_KEY: &str = "language";
/// Key holding the UI theme
pub const THEME_KEY: &str = "theme";

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine data directory")]
    NoDataDir,
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("com", "mensajero", "Mensajero")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
