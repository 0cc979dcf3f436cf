//! Engine settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux/macOS: ~/.config/trufos/settings.json
//! - Windows: %APPDATA%/trufos/settings.json

use std::path::{Path, PathBuf};

use tokio::fs;
use trufos_domain::EngineSettings;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

const APP_DIR: &str = "trufos";
const SETTINGS_FILE: &str = "settings.json";
const SECRET_KEY_FILE: &str = "secret.key";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for engine settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    config_dir: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository rooted at the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: dirs::config_dir().map(|p| p.join(APP_DIR)),
        }
    }

    /// Creates a repository rooted at an explicit directory.
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(config_dir.into()),
        }
    }

    /// Returns the Trufos config directory, if one could be determined.
    #[must_use]
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Returns the path to the settings file.
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|p| p.join(SETTINGS_FILE))
    }

    /// Returns the key file named in `settings`, or the default location.
    #[must_use]
    pub fn secret_key_path(&self, settings: &EngineSettings) -> Option<PathBuf> {
        settings
            .secret_key_file
            .clone()
            .or_else(|| self.config_dir.as_ref().map(|p| p.join(SECRET_KEY_FILE)))
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<EngineSettings, SettingsError> {
        let Some(path) = self.settings_path() else {
            return Ok(EngineSettings::default());
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(EngineSettings::default());
        }

        let content = fs::read(&path).await?;
        let settings = from_json_bytes(&content)?;
        Ok(settings)
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory is known or the write fails.
    pub async fn save(&self, settings: &EngineSettings) -> Result<(), SettingsError> {
        let Some(config_dir) = self.config_dir() else {
            return Err(SettingsError::NoConfigDir);
        };

        fs::create_dir_all(config_dir).await?;

        let content = to_json_stable_bytes(settings)?;
        fs::write(config_dir.join(SETTINGS_FILE), content).await?;

        Ok(())
    }
}
