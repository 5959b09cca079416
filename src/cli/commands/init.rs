//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cardlive.toml")]
    pub output: String,

    /// Include comments explaining each setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing CARD:Live configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point data.directory at your sample JSON files");
                println!("  2. Validate configuration: cardlive validate-config");
                println!("  3. Print a summary: cardlive summary --group-by geo_area_code");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# CARD:Live Configuration File

[application]
log_level = "info"

[data]
directory = "data/card_live"
antarctica_cutoff = "2020-07-20"
enable_correction = true
enable_taxonomy = true

[refresh]
interval_seconds = 600

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# CARD:Live Configuration File
#
# Every setting has a default; delete any line to fall back to it.
# Values may reference environment variables as ${VAR_NAME}, and any
# setting can be overridden with CARDLIVE_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Input Data
# ============================================================================
[data]
# Directory with one JSON report per sample; dot-files are ignored
directory = "data/card_live"

# Samples reported before this instant with geo_area_code 10 (Antarctica)
# are reassigned to -10 (not applicable)
antarctica_cutoff = "2020-07-20"
enable_correction = true

# Copy the first rgi_kmer / lmat taxonomy label onto each sample
enable_taxonomy = true

# ============================================================================
# Refresh
# ============================================================================
[refresh]
# Seconds between checks for new sample files (watch command)
interval_seconds = 600

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to a rolling file in addition to the console
local_enabled = false
local_path = "logs"

# Rotation strategy (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_generated_configs_are_valid() {
        assert!(parse_config(&InitArgs::generate_minimal_config()).is_ok());
        assert!(parse_config(&InitArgs::generate_config_with_examples()).is_ok());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("cardlive.toml");
        fs::write(&output, "").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[data]"));
    }
}
