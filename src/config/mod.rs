//! Configuration management for CARD:Live.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! CARD:Live uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CARDLIVE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cardlive::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cardlive.toml")?;
//!
//! println!("Data directory: {}", config.data.directory.display());
//! println!("Refresh every {}s", config.refresh.interval_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`DataConfig`] - Input directory and post-load modifiers
//! - [`RefreshConfig`] - Periodic refresh interval
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [data]
//! directory = "${CARDLIVE_DATA_DIR}"
//! antarctica_cutoff = "2020-07-20"
//! enable_taxonomy = true
//!
//! [refresh]
//! interval_seconds = 600
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, CardLiveConfig, DataConfig, LoggingConfig, RefreshConfig};
