//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CardLiveConfig;
use crate::domain::errors::CardLiveError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CardLiveConfig
/// 4. Applies environment variable overrides (CARDLIVE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CardLiveError::Configuration`] if the file cannot be read or
/// parsed, a referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cardlive::config::loader::load_config;
///
/// let config = load_config("cardlive.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CardLiveConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CardLiveError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CardLiveError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, applying substitution, overrides and
/// validation exactly as [`load_config`] does
pub fn parse_config(contents: &str) -> Result<CardLiveConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CardLiveConfig = toml::from_str(&contents)
        .map_err(|e| CardLiveError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CardLiveError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CardLiveError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CardLiveError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CARDLIVE_* prefix
///
/// Environment variables follow the pattern: CARDLIVE_<SECTION>_<KEY>
/// For example: CARDLIVE_DATA_DIRECTORY, CARDLIVE_REFRESH_INTERVAL_SECONDS.
/// Unparsable numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut CardLiveConfig) {
    if let Ok(val) = std::env::var("CARDLIVE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CARDLIVE_DATA_DIRECTORY") {
        config.data.directory = val.into();
    }
    if let Ok(val) = std::env::var("CARDLIVE_DATA_ANTARCTICA_CUTOFF") {
        config.data.antarctica_cutoff = val;
    }
    if let Ok(val) = std::env::var("CARDLIVE_DATA_ENABLE_CORRECTION") {
        if let Ok(enabled) = val.parse() {
            config.data.enable_correction = enabled;
        }
    }
    if let Ok(val) = std::env::var("CARDLIVE_DATA_ENABLE_TAXONOMY") {
        if let Ok(enabled) = val.parse() {
            config.data.enable_taxonomy = enabled;
        }
    }

    if let Ok(val) = std::env::var("CARDLIVE_REFRESH_INTERVAL_SECONDS") {
        if let Ok(interval) = val.parse() {
            config.refresh.interval_seconds = interval;
        }
    }

    if let Ok(val) = std::env::var("CARDLIVE_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("CARDLIVE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
