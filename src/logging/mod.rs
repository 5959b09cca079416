//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cardlive::logging::init_logging;
//! use cardlive::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Dashboard data core started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a directory load
///
/// # Example
///
/// ```no_run
/// use cardlive::log_load_start;
/// use std::path::Path;
///
/// log_load_start!(Path::new("data/card_live").display(), 12);
/// ```
#[macro_export]
macro_rules! log_load_start {
    ($directory:expr, $files:expr) => {
        tracing::info!(
            directory = %$directory,
            files = $files,
            "Loading sample files"
        );
    };
}

/// Log the completion of a directory load
///
/// # Example
///
/// ```no_run
/// use cardlive::log_load_complete;
/// use std::time::Duration;
///
/// log_load_complete!(42, Duration::from_millis(350));
/// ```
#[macro_export]
macro_rules! log_load_complete {
    ($samples:expr, $duration:expr) => {
        tracing::info!(
            samples = $samples,
            duration_ms = $duration.as_millis(),
            "Load completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cardlive::log_error_with_context;
/// use cardlive::domain::CardLiveError;
///
/// let error = CardLiveError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn test_macros_expand() {
        crate::log_load_start!("data", 3);
        crate::log_load_complete!(3, Duration::from_millis(5));
        crate::log_error_with_context!("boom", "testing");
    }
}
