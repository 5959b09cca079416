//! Core data logic for CARD:Live.
//!
//! # Modules
//!
//! - [`load`] - Directory listing and JSON loading
//! - [`transform`] - Normalization of one sample report into typed rows
//! - [`index`] - Selector over resistance calls
//! - [`dataset`] - The immutable dataset, selections and value counts
//! - [`modifiers`] - Post-load corrections and enrichment
//! - [`state`] - Incremental refresh and the shared dataset store
//!
//! # Workflow
//!
//! 1. **Load**: read every sample file into a [`dataset::Dataset`]
//! 2. **Modify**: apply the historical correction and taxonomy enrichment
//! 3. **Serve**: keep the result in a [`state::DatasetStore`]
//! 4. **Select**: narrow snapshots by time or resistance calls and count
//! 5. **Refresh**: reload when new files appear
//!
//! # Example
//!
//! ```rust,no_run
//! use cardlive::config::DataConfig;
//! use cardlive::core::dataset::Selection;
//! use cardlive::core::state::{DatasetRefresher, DatasetStore};
//!
//! # fn example() -> cardlive::domain::Result<()> {
//! let refresher = DatasetRefresher::from_config(&DataConfig::default())?;
//! let store = DatasetStore::new();
//! store.refresh(&refresher)?;
//!
//! if let Some(data) = store.current() {
//!     let strict = data.select(&Selection::parse("rgi", "cutoff", &["strict"])?);
//!     println!("{} samples with strict hits", strict.samples_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod index;
pub mod load;
pub mod modifiers;
pub mod state;
pub mod transform;
