//! Taxonomy labels on the sample table
//!
//! Copies the label of the first k-mer prediction and the first whole-read
//! classification of each sample onto its record. Rows keep their source
//! order; no ranking is applied.

use crate::core::dataset::Dataset;
use crate::core::modifiers::DatasetModifier;
use crate::domain::hits::CategoryRow;
use crate::domain::ids::SampleKey;
use crate::domain::Result;
use std::collections::BTreeMap;

/// Attaches `rgi_kmer_taxonomy` and `lmat_taxonomy` to every sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxonomyEnricher;

impl TaxonomyEnricher {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetModifier for TaxonomyEnricher {
    fn modify(&self, data: &Dataset) -> Result<Dataset> {
        let kmer = first_labels(data.rgi_kmer(), |row| row.taxonomy_label.clone());
        let lmat = first_labels(data.lmat(), |row| row.taxonomy_label.clone());

        Ok(data.with_samples(|sample| {
            sample.rgi_kmer_taxonomy = kmer.get(&sample.key).cloned().flatten();
            sample.lmat_taxonomy = lmat.get(&sample.key).cloned().flatten();
        }))
    }

    fn name(&self) -> &'static str {
        "taxonomy_enricher"
    }
}

fn first_labels<R, F>(rows: &[R], label: F) -> BTreeMap<SampleKey, Option<String>>
where
    R: CategoryRow,
    F: Fn(&R) -> Option<String>,
{
    let mut labels = BTreeMap::new();
    for row in rows {
        labels
            .entry(row.key().clone())
            .or_insert_with(|| label(row));
    }
    labels
}
