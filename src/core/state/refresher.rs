//! Incremental refresh of the dataset
//!
//! A refresh only reloads when new sample files appeared since the existing
//! dataset was built. Removed files do not trigger a reload on their own.

use crate::config::DataConfig;
use crate::core::dataset::Dataset;
use crate::core::load::RecordLoader;
use crate::core::modifiers::{self, AntarcticaCorrector, DatasetModifier, TaxonomyEnricher};
use crate::domain::Result;
use std::sync::Arc;

/// Loads a dataset and applies modifiers, reusing the existing one when possible
pub struct DatasetRefresher {
    loader: RecordLoader,
    modifiers: Vec<Box<dyn DatasetModifier>>,
}

impl DatasetRefresher {
    /// Create a refresher applying `modifiers` in order after each full load
    pub fn new(loader: RecordLoader, modifiers: Vec<Box<dyn DatasetModifier>>) -> Self {
        Self { loader, modifiers }
    }

    /// Build the refresher described by the data configuration
    ///
    /// The Antarctica correction runs before taxonomy enrichment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::CardLiveError::Configuration`] if the
    /// correction cutoff cannot be parsed.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        let mut modifiers: Vec<Box<dyn DatasetModifier>> = Vec::new();
        if config.enable_correction {
            modifiers.push(Box::new(AntarcticaCorrector::from_cutoff(
                &config.antarctica_cutoff,
            )?));
        }
        if config.enable_taxonomy {
            modifiers.push(Box::new(TaxonomyEnricher::new()));
        }

        Ok(Self::new(RecordLoader::new(&config.directory), modifiers))
    }

    pub fn loader(&self) -> &RecordLoader {
        &self.loader
    }

    /// Return an up-to-date dataset
    ///
    /// With no `existing` dataset a full load is performed. Otherwise the
    /// directory is listed and, if it holds no file missing from `existing`,
    /// the same `Arc` is returned without reading any file. When new files are
    /// found the whole directory is reloaded and the modifiers are re-applied.
    ///
    /// # Errors
    ///
    /// Propagates loader and modifier errors; `existing` is never altered.
    pub fn update_data(&self, existing: Option<&Arc<Dataset>>) -> Result<Arc<Dataset>> {
        let Some(existing) = existing else {
            tracing::info!(directory = %self.loader.directory().display(), "Performing initial load");
            return self.load_all().map(Arc::new);
        };

        let known = existing.files();
        let new_files = self
            .loader
            .list_files()?
            .into_keys()
            .filter(|key| !known.contains(key))
            .count();

        if new_files == 0 {
            tracing::debug!("No new sample files; keeping current dataset");
            return Ok(Arc::clone(existing));
        }

        tracing::info!(new_files, "New sample files found; reloading");
        self.load_all().map(Arc::new)
    }

    fn load_all(&self) -> Result<Dataset> {
        let data = self.loader.read_data()?;
        modifiers::apply_all(data, &self.modifiers)
    }
}

impl std::fmt::Debug for DatasetRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetRefresher")
            .field("loader", &self.loader)
            .field(
                "modifiers",
                &self.modifiers.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
