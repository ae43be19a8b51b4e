//! Configuration management for folio.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults; every section tolerates missing keys via `#[serde(default)]`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings
    pub conversion: ConversionConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Platform-appropriate: `~/.config/folio/config.toml` on Linux,
    /// `~/Library/Application Support/io.folio.folio/config.toml` on macOS.
    /// Falls back to `~/.folio/config.toml` if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("io", "folio", "folio")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".folio").join("config.toml")
            })
    }

    /// Reject out-of-range values before any scanning happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion.quality > 100 {
            return Err(ConfigError::Validation(format!(
                "quality must be 0-100, got {}",
                self.conversion.quality
            )));
        }
        if self.conversion.supported_formats.is_empty() {
            return Err(ConfigError::Validation(
                "supported_formats must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// JPEG re-encode quality (0-100)
    pub quality: u8,

    /// Eligible input extensions, matched case-insensitively
    pub supported_formats: Vec<String>,

    /// Suffix appended to the source directory name for mirror output
    /// (`<dir>-compressed` by default)
    pub mirror_suffix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: 92,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
            mirror_suffix: "compressed".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.quality, 92);
        assert_eq!(
            config.conversion.supported_formats,
            vec!["jpg", "jpeg", "png", "webp"]
        );
        assert_eq!(config.conversion.mirror_suffix, "compressed");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[conversion]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let mut config = Config::default();
        config.conversion.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[conversion]\nquality = 70\n").unwrap();
        assert_eq!(config.conversion.quality, 70);
        assert_eq!(config.conversion.mirror_suffix, "compressed");
        assert_eq!(config.logging.level, "info");
    }
}
