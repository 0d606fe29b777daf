//! Configuration file handling for ~/.tilegrid/config.ini.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::TilingConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Config text is not valid INI
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] ini::ParseError),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Two keys that configure the same setting were both given
    #[error("Conflicting configuration: {section}.{first} and {section}.{second} are mutually exclusive")]
    Conflict {
        section: String,
        first: String,
        second: String,
    },
}

impl TilingConfig {
    /// Load configuration from the default path (~/.tilegrid/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "Loading tiling config");
        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        super::parser::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.tilegrid).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilegrid")
}

/// Get the path to the config file (~/.tilegrid/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path_is_under_config_directory() {
        let path = config_file_path();
        assert!(path.starts_with(config_directory()));
        assert!(path.ends_with("config.ini"));
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let path = Path::new("/nonexistent/tilegrid/config.ini");
        let config = TilingConfig::load_from(path).unwrap();
        assert_eq!(config, TilingConfig::default());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            section: "tiling".to_string(),
            key: "border_texels".to_string(),
            value: "-1".to_string(),
            reason: "must be a non-negative integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tiling.border_texels = '-1' - must be a non-negative integer"
        );
    }

    #[test]
    fn test_conflict_display() {
        let err = ConfigError::Conflict {
            section: "tiling".to_string(),
            first: "border_texels".to_string(),
            second: "has_border_texels".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conflicting configuration: tiling.border_texels and tiling.has_border_texels are mutually exclusive"
        );
    }
}
