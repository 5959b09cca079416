//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for CARD:Live using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// CARD:Live - antimicrobial resistance dashboard data core
#[derive(Parser, Debug)]
#[command(name = "cardlive")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cardlive.toml", env = "CARDLIVE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CARDLIVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the data directory and print sample counts
    Summary(commands::summary::SummaryArgs),

    /// Periodically refresh the dataset until interrupted
    Watch(commands::watch::WatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
