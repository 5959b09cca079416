//! Configuration schema types

use crate::domain::time::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main CARD:Live configuration
///
/// This is the root configuration structure that maps to the TOML file. Every
/// section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardLiveConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input data settings
    #[serde(default)]
    pub data: DataConfig,

    /// Periodic refresh settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CardLiveConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.data.validate()?;
        self.refresh.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Input data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one JSON file per sample
    #[serde(default = "default_data_directory")]
    pub directory: PathBuf,

    /// Samples before this instant reporting Antarctica get "not applicable"
    #[serde(default = "default_antarctica_cutoff")]
    pub antarctica_cutoff: String,

    /// Whether the historical geographic correction is applied after loading
    #[serde(default = "default_true")]
    pub enable_correction: bool,

    /// Whether taxonomy labels are attached to samples after loading
    #[serde(default = "default_true")]
    pub enable_taxonomy: bool,
}

impl DataConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("data.directory cannot be empty".to_string());
        }

        parse_timestamp(&self.antarctica_cutoff)
            .map_err(|e| format!("Invalid data.antarctica_cutoff: {}", e))?;

        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
            antarctica_cutoff: default_antarctica_cutoff(),
            enable_correction: true,
            enable_taxonomy: true,
        }
    }
}

/// Periodic refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between checks for new sample files
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl RefreshConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_seconds == 0 {
            return Err("refresh.interval_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_data_directory() -> PathBuf {
    PathBuf::from("data/card_live")
}

fn default_antarctica_cutoff() -> String {
    "2020-07-20".to_string()
}

fn default_interval_seconds() -> u64 {
    600
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CardLiveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh.interval_seconds, 600);
        assert_eq!(config.data.antarctica_cutoff, "2020-07-20");
        assert!(config.data.enable_taxonomy);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CardLiveConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.data.directory, PathBuf::from("data/card_live"));
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_config_validation() {
        let mut config = DataConfig::default();

        config.antarctica_cutoff = "not a date".to_string();
        assert!(config.validate().is_err());

        config.antarctica_cutoff = "2020-07-20T00:00:00".to_string();
        assert!(config.validate().is_ok());

        config.directory = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_config_validation() {
        let config = RefreshConfig {
            interval_seconds: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "daily".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }
}
