//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the CARD:Live configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the data directory exists
    #[arg(long)]
    pub check_data_dir: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Data Directory: {}", config.data.directory.display());
        println!("  Antarctica Cutoff: {}", config.data.antarctica_cutoff);
        println!("  Correction Enabled: {}", config.data.enable_correction);
        println!("  Taxonomy Enabled: {}", config.data.enable_taxonomy);
        println!("  Refresh Interval: {}s", config.refresh.interval_seconds);
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();

        if self.check_data_dir && !config.data.directory.is_dir() {
            println!(
                "❌ Data directory does not exist: {}",
                config.data.directory.display()
            );
            return Ok(3);
        }

        Ok(0)
    }
}
