//! Summary command implementation
//!
//! This module implements the `summary` command: load the data directory,
//! apply the configured modifiers, narrow the dataset with the given filters
//! and print the counts a dashboard view would chart.

use crate::config::load_config;
use crate::core::dataset::{Dataset, IncludeTable, Selection, ValueCounts};
use crate::core::state::DatasetRefresher;
use crate::domain::{CardLiveError, Result};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the summary command
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Override the data directory from the configuration
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Earliest sample timestamp to include
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Latest sample timestamp to include
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Keep samples with calls at these cutoff levels (comma-separated, or "all")
    #[arg(long, value_delimiter = ',')]
    pub cutoff: Vec<String>,

    /// Keep samples with calls in any of these drug classes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drug_class: Vec<String>,

    /// Keep samples with any of these best-hit AROs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub best_hit_aro: Vec<String>,

    /// Columns to count samples by (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "geo_area_code")]
    pub group_by: Vec<String>,

    /// Category table to join before counting (rgi_main, rgi_kmer, mlst, lmat)
    #[arg(long)]
    pub include: Option<String>,

    /// Print counts as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    /// Execute the summary command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting summary command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(dir) = &self.data_dir {
            tracing::info!(directory = %dir.display(), "Overriding data directory from CLI");
            config.data.directory = dir.clone();
        }

        let (selections, include) = match self.parse_filters() {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let refresher = match DatasetRefresher::from_config(&config.data) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let data = match refresher.update_data(None) {
            Ok(data) => data,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load sample data");
                eprintln!("❌ Failed to load data from {}", config.data.directory.display());
                eprintln!("   Error: {e}");
                return Ok(if e.is_data_error() { 3 } else { 5 });
            }
        };

        let selected = selections
            .iter()
            .fold((*data).clone(), |current, selection| current.select(selection));

        let columns: Vec<&str> = self.group_by.iter().map(String::as_str).collect();
        let counts = selected.value_counts(&columns, include);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        } else {
            print_summary(&data, &selected, &counts);
        }

        Ok(0)
    }

    /// Turn the command-line filters into dataset selections
    fn parse_filters(&self) -> Result<(Vec<Selection>, Option<IncludeTable>)> {
        let mut selections = Vec::new();

        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            selections.push(Selection::parse("main", "time", &[start, end])?);
        }
        if !self.cutoff.is_empty() {
            selections.push(Selection::parse("rgi", "cutoff", self.cutoff.as_slice())?);
        }
        if !self.drug_class.is_empty() {
            selections.push(Selection::parse("rgi", "drug_class", self.drug_class.as_slice())?);
        }
        if !self.best_hit_aro.is_empty() {
            selections.push(Selection::parse("rgi", "best_hit_aro", self.best_hit_aro.as_slice())?);
        }

        if self.group_by.is_empty() {
            return Err(CardLiveError::Validation(
                "--group-by needs at least one column".to_string(),
            ));
        }

        let include = self
            .include
            .as_deref()
            .map(str::parse::<IncludeTable>)
            .transpose()?;

        Ok((selections, include))
    }
}

fn print_summary(all: &Dataset, selected: &Dataset, counts: &ValueCounts) {
    println!("📊 CARD:Live summary");
    println!();
    println!("  Samples loaded: {}", all.samples_count());
    println!("  Samples selected: {}", selected.samples_count());
    match all.latest_update() {
        Some(latest) => println!("  Latest update: {latest}"),
        None => println!("  Latest update: n/a"),
    }
    println!(
        "  Drug classes in selection: {}",
        selected.rgi_index().drug_classes().len()
    );
    println!();
    println!("  {}  count", counts.columns().join(" | "));
    for (group, count) in counts.iter() {
        println!("  {}  {}", group.join(" | "), count);
    }
    println!();
}
