//! Configuration module for captag
//!
//! Manages application defaults: sidecar extension, the cleanup blacklist
//! and the external tagger location. Configuration is stored in the user's
//! config directory.

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default confidence threshold passed to the external tagger.
pub const DEFAULT_TAGGER_THRESHOLD: f64 = 0.35;

fn default_tag_extension() -> String {
    ".txt".to_string()
}

const fn default_threshold() -> f64 {
    DEFAULT_TAGGER_THRESHOLD
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptagConfig {
    /// Sidecar extension used when a command doesn't override it
    #[serde(default = "default_tag_extension")]
    pub tag_extension: String,

    /// Tags stripped by the cleanup pass
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Location of the external auto-tagging tool, if installed
    #[serde(default)]
    pub tagger_path: Option<PathBuf>,

    /// Confidence threshold handed to the tagger unless overridden
    #[serde(default = "default_threshold")]
    pub tagger_threshold: f64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for CaptagConfig {
    fn default() -> Self {
        Self {
            tag_extension: default_tag_extension(),
            blacklist: Vec::new(),
            tagger_path: None,
            tagger_threshold: DEFAULT_TAGGER_THRESHOLD,
            quiet: false,
        }
    }
}

impl CaptagConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        let captag_config_dir = config_dir.join("captag");
        Ok(captag_config_dir.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CaptagConfig::default();
        assert_eq!(config.tag_extension, ".txt");
        assert!(config.blacklist.is_empty());
        assert!(config.tagger_path.is_none());
        assert!((config.tagger_threshold - DEFAULT_TAGGER_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = CaptagConfig {
            tag_extension: ".caption".to_string(),
            blacklist: vec!["lowres".to_string()],
            tagger_path: Some(PathBuf::from("/opt/tagger")),
            tagger_threshold: 0.5,
            quiet: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: CaptagConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.tag_extension, ".caption");
        assert_eq!(parsed.blacklist, vec!["lowres"]);
        assert_eq!(parsed.tagger_path, Some(PathBuf::from("/opt/tagger")));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: CaptagConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.tag_extension, ".txt");
        assert!(!parsed.quiet);
    }
}
