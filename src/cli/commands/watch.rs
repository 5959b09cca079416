//! Watch command implementation
//!
//! Keeps a [`DatasetStore`] up to date by polling the data directory on a
//! fixed interval until a shutdown signal arrives.

use crate::config::load_config;
use crate::core::state::{DatasetRefresher, DatasetStore, RefreshOutcome};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the watch command
#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Override the data directory from the configuration
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Override the refresh interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,
}

impl WatchArgs {
    /// Execute the watch command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(dir) = &self.data_dir {
            config.data.directory = dir.clone();
        }
        let interval_seconds = self.interval.unwrap_or(config.refresh.interval_seconds);
        if interval_seconds == 0 {
            eprintln!("❌ Refresh interval must be > 0");
            return Ok(2);
        }

        let refresher = match DatasetRefresher::from_config(&config.data) {
            Ok(r) => Arc::new(r),
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        let store = Arc::new(DatasetStore::new());

        tracing::info!(
            directory = %config.data.directory.display(),
            interval_seconds,
            "Watching data directory"
        );
        println!(
            "👀 Watching {} every {}s (Ctrl+C to stop)",
            config.data.directory.display(),
            interval_seconds
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    refresh_once(Arc::clone(&store), Arc::clone(&refresher)).await?;
                }
                changed = shutdown_signal.changed() => {
                    if changed.is_err() || *shutdown_signal.borrow() {
                        tracing::info!("Shutdown requested; stopping watch");
                        break;
                    }
                }
            }
        }

        match store.current() {
            Some(data) => println!("✅ Stopped with {} samples loaded", data.samples_count()),
            None => println!("✅ Stopped before any data was loaded"),
        }
        Ok(0)
    }
}

/// Run one refresh on the blocking pool and log its outcome
///
/// A failed refresh is logged and the previous dataset stays active.
async fn refresh_once(
    store: Arc<DatasetStore>,
    refresher: Arc<DatasetRefresher>,
) -> anyhow::Result<()> {
    let outcome = {
        let store = Arc::clone(&store);
        tokio::task::spawn_blocking(move || store.refresh(&refresher)).await?
    };

    match outcome {
        Ok(RefreshOutcome::Unchanged) => {
            tracing::debug!("Dataset unchanged");
        }
        Ok(outcome) => {
            let (samples, latest) = store
                .current()
                .map(|d| (d.samples_count(), d.latest_update()))
                .unwrap_or((0, None));
            tracing::info!(%outcome, samples, latest = ?latest, "Dataset refreshed");
            println!("🔄 Dataset {outcome}: {samples} samples");
        }
        Err(e) => {
            log_error_with_context!(&e, "Refresh failed; keeping previous dataset");
            eprintln!("⚠️  Refresh failed: {e}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_refresh_once_loads_then_keeps_store() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("s1"),
            r#"{"timestamp": "2020-06-01", "geo_area_code": 4}"#,
        )
        .unwrap();

        let refresher = Arc::new(
            DatasetRefresher::from_config(&DataConfig {
                directory: dir.path().to_path_buf(),
                ..DataConfig::default()
            })
            .unwrap(),
        );
        let store = Arc::new(DatasetStore::new());

        refresh_once(Arc::clone(&store), Arc::clone(&refresher))
            .await
            .unwrap();
        assert_eq!(store.current().unwrap().samples_count(), 1);

        fs::write(dir.path().join("s2"), "{broken").unwrap();
        refresh_once(Arc::clone(&store), refresher).await.unwrap();
        assert_eq!(store.current().unwrap().samples_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_config_exit_code() {
        let (_tx, rx) = watch::channel(false);
        let code = WatchArgs::default()
            .execute("does-not-exist.toml", rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
