//! Post-load dataset modifiers
//!
//! A modifier takes a dataset and returns a new one. The refresher applies the
//! configured modifiers in order after every full load.

pub mod antarctica;
pub mod taxonomy;

pub use antarctica::AntarcticaCorrector;
pub use taxonomy::TaxonomyEnricher;

use crate::core::dataset::Dataset;
use crate::domain::Result;

/// Transformation applied to a freshly loaded dataset
pub trait DatasetModifier: Send + Sync {
    /// Return a modified copy of `data`; `data` itself is left untouched
    fn modify(&self, data: &Dataset) -> Result<Dataset>;

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

/// Apply `modifiers` in order
pub fn apply_all(data: Dataset, modifiers: &[Box<dyn DatasetModifier>]) -> Result<Dataset> {
    modifiers.iter().try_fold(data, |current, modifier| {
        let next = modifier.modify(&current)?;
        tracing::debug!(modifier = modifier.name(), "Applied dataset modifier");
        Ok(next)
    })
}
