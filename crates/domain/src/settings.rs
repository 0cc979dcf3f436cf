//! Engine Settings Domain Model
//!
//! Defines the user-level configuration of the Trufos collection store.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User settings for the collection store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Collection opened when no directory is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_collection_dir: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `info` or `trufos_infrastructure=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// File holding the base64 key used to encrypt secrets files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_file: Option<PathBuf>,
}

impl EngineSettings {
    /// Default log filter when neither the environment nor settings set one.
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    /// Returns the configured log filter or the default.
    #[must_use]
    pub fn log_filter_or_default(&self) -> &str {
        self.log_filter
            .as_deref()
            .unwrap_or(Self::DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = EngineSettings::default();
        assert!(settings.default_collection_dir.is_none());
        assert_eq!(settings.log_filter_or_default(), "info");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: EngineSettings = serde_json::from_str("{}").unwrap_or_default();
        assert_eq!(settings, EngineSettings::default());

        let settings: EngineSettings =
            serde_json::from_str(r#"{"log_filter": "debug"}"#).unwrap_or_default();
        assert_eq!(settings.log_filter_or_default(), "debug");
    }
}
