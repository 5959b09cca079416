//! The immutable dataset
//!
//! A [`Dataset`] holds the sample table, the resistance-call index and the three
//! auxiliary category tables. All of them share one key space. Selection never
//! changes a dataset in place; it narrows every table through
//! [`Dataset::select_by_files`] and returns a new value, so any number of
//! readers can select from the same dataset concurrently.
//!
//! # Example
//!
//! ```rust,no_run
//! use cardlive::core::dataset::Selection;
//! use cardlive::core::load::RecordLoader;
//!
//! # fn example() -> cardlive::domain::Result<()> {
//! let data = RecordLoader::new("data/card_live").read_data()?;
//!
//! let perfect = data.select(&Selection::parse("rgi", "cutoff", &["perfect"])?);
//! let by_geo = perfect.value_counts(&["geo_area_code"], None);
//!
//! println!("{} samples, {} regions", perfect.samples_count(), by_geo.len());
//! # Ok(())
//! # }
//! ```

pub mod counts;
pub mod selection;

pub use counts::{IncludeTable, ValueCounts};
pub use selection::Selection;

use crate::core::index::ResistanceIndex;
use crate::core::transform::ParsedSample;
use crate::domain::category::AnalysisCategory;
use crate::domain::hits::{
    CategoryRow, KmerTaxonomyRow, ResistanceCall, SequenceTypeRow, WholeReadTaxonomyRow,
};
use crate::domain::ids::SampleKey;
use crate::domain::{CardLiveError, Result, SampleRecord};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};

/// Sample table plus the four category tables, keyed by sample
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: BTreeMap<SampleKey, SampleRecord>,
    rgi: ResistanceIndex,
    rgi_kmer: Vec<KmerTaxonomyRow>,
    mlst: Vec<SequenceTypeRow>,
    lmat: Vec<WholeReadTaxonomyRow>,
}

impl Dataset {
    /// Build a dataset from its tables
    ///
    /// # Errors
    ///
    /// Returns [`CardLiveError::InconsistentDataset`] if a sample key appears
    /// twice, or a category row references a sample that is not in the sample
    /// table.
    pub fn new(
        samples: Vec<SampleRecord>,
        rgi_main: Vec<ResistanceCall>,
        rgi_kmer: Vec<KmerTaxonomyRow>,
        mlst: Vec<SequenceTypeRow>,
        lmat: Vec<WholeReadTaxonomyRow>,
    ) -> Result<Self> {
        let mut table = BTreeMap::new();
        for record in samples {
            let key = record.key.clone();
            if table.insert(key.clone(), record).is_some() {
                return Err(CardLiveError::InconsistentDataset(format!(
                    "duplicate sample key '{key}'"
                )));
            }
        }

        check_orphans(&table, &rgi_main)?;
        check_orphans(&table, &rgi_kmer)?;
        check_orphans(&table, &mlst)?;
        check_orphans(&table, &lmat)?;

        let universe = table.keys().cloned().collect();
        Ok(Self {
            samples: table,
            rgi: ResistanceIndex::new(rgi_main, universe),
            rgi_kmer,
            mlst,
            lmat,
        })
    }

    /// Build a dataset from normalized sample reports, keeping their order
    pub fn from_parsed(parsed: Vec<ParsedSample>) -> Result<Self> {
        let mut samples = Vec::with_capacity(parsed.len());
        let mut rgi_main = Vec::new();
        let mut rgi_kmer = Vec::new();
        let mut mlst = Vec::new();
        let mut lmat = Vec::new();

        for sample in parsed {
            samples.push(sample.record);
            rgi_main.extend(sample.rgi_main);
            rgi_kmer.extend(sample.rgi_kmer);
            mlst.extend(sample.mlst);
            lmat.extend(sample.lmat);
        }

        Self::new(samples, rgi_main, rgi_kmer, mlst, lmat)
    }

    /// Apply a selection
    pub fn select(&self, selection: &Selection) -> Self {
        match selection {
            Selection::Time { start, end } => self.select_by_time(*start, *end),
            Selection::Rgi(selector) => self.select_from_index(self.rgi.select(selector)),
        }
    }

    /// Samples with `start <= timestamp <= end`
    pub fn select_by_time(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let keys = self
            .samples
            .values()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .map(|s| s.key.clone())
            .collect();
        self.select_by_files(&keys)
    }

    /// Narrow every table to the samples in `keys`
    ///
    /// Keys not in this dataset are ignored, so the result's
    /// [`files`](Self::files) is `keys ∩ self.files()`.
    pub fn select_by_files(&self, keys: &BTreeSet<SampleKey>) -> Self {
        let samples: BTreeMap<SampleKey, SampleRecord> = self
            .samples
            .iter()
            .filter(|(key, _)| keys.contains(*key))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();
        let kept: BTreeSet<SampleKey> = samples.keys().cloned().collect();

        tracing::debug!(
            requested = keys.len(),
            before = self.samples.len(),
            after = samples.len(),
            "Selected samples by file"
        );

        Self {
            rgi: self.rgi.select_by_files(&kept),
            rgi_kmer: retain_keys(&self.rgi_kmer, &kept),
            mlst: retain_keys(&self.mlst, &kept),
            lmat: retain_keys(&self.lmat, &kept),
            samples,
        }
    }

    fn select_from_index(&self, index: ResistanceIndex) -> Self {
        let keys = index.files().clone();
        let mut selected = self.select_by_files(&keys);
        selected.rgi = index.select_by_files(&selected.files());
        selected
    }

    /// Return a new dataset with `update` applied to every sample record
    ///
    /// Category tables are carried over unchanged.
    pub fn with_samples<F>(&self, mut update: F) -> Self
    where
        F: FnMut(&mut SampleRecord),
    {
        let mut next = self.clone();
        for record in next.samples.values_mut() {
            update(record);
        }
        next
    }

    /// Set of sample keys in this dataset
    pub fn files(&self) -> BTreeSet<SampleKey> {
        self.samples.keys().cloned().collect()
    }

    /// Number of samples
    pub fn samples_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample timestamp, `None` for an empty dataset
    pub fn latest_update(&self) -> Option<NaiveDateTime> {
        self.samples.values().map(|s| s.timestamp).max()
    }

    /// Count samples per distinct value of `columns`
    ///
    /// Sample columns are addressed by name (`geo_area_code`,
    /// `analysis_valid`, ...). With `include` set, that category table is
    /// left-joined first and its columns are addressed as `<category>.<key>`.
    /// Each sample contributes at most once: per column the first non-null
    /// value among its joined rows is used, and samples with a null in any
    /// grouping column are not counted.
    pub fn value_counts(&self, columns: &[&str], include: Option<IncludeTable>) -> ValueCounts {
        match include {
            None => self.count_joined::<ResistanceCall>(columns, None),
            Some(AnalysisCategory::RgiMain) => self.count_joined(columns, Some(self.rgi.calls())),
            Some(AnalysisCategory::RgiKmer) => self.count_joined(columns, Some(&self.rgi_kmer)),
            Some(AnalysisCategory::Mlst) => self.count_joined(columns, Some(&self.mlst)),
            Some(AnalysisCategory::Lmat) => self.count_joined(columns, Some(&self.lmat)),
        }
    }

    fn count_joined<R: CategoryRow>(&self, columns: &[&str], joined: Option<&[R]>) -> ValueCounts {
        let grouped = joined.map(group_rows).unwrap_or_default();
        let prefix = format!("{}.", R::CATEGORY.field_name());
        let mut counts = ValueCounts::new(columns.iter().map(|c| c.to_string()).collect());

        for sample in self.samples.values() {
            let rows = grouped.get(&sample.key).map(Vec::as_slice).unwrap_or(&[]);
            let group: Option<Vec<String>> = columns
                .iter()
                .map(|column| {
                    if joined.is_some() && column.starts_with(&prefix) {
                        rows.iter().find_map(|row| row.column(column))
                    } else {
                        sample.column(column)
                    }
                })
                .collect();

            if let Some(group) = group {
                counts.increment(group);
            }
        }

        counts
    }

    /// Sample records in key order
    pub fn samples(&self) -> impl Iterator<Item = &SampleRecord> {
        self.samples.values()
    }

    /// A single sample record
    pub fn sample(&self, key: &SampleKey) -> Option<&SampleRecord> {
        self.samples.get(key)
    }

    /// The resistance-call index
    pub fn rgi_index(&self) -> &ResistanceIndex {
        &self.rgi
    }

    /// Rows of the primary resistance-call table
    pub fn rgi_calls(&self) -> &[ResistanceCall] {
        self.rgi.calls()
    }

    /// Rows of the k-mer prediction table
    pub fn rgi_kmer(&self) -> &[KmerTaxonomyRow] {
        &self.rgi_kmer
    }

    /// Rows of the sequence typing table
    pub fn mlst(&self) -> &[SequenceTypeRow] {
        &self.mlst
    }

    /// Rows of the whole-read classification table
    pub fn lmat(&self) -> &[WholeReadTaxonomyRow] {
        &self.lmat
    }
}

fn check_orphans<R: CategoryRow>(
    samples: &BTreeMap<SampleKey, SampleRecord>,
    rows: &[R],
) -> Result<()> {
    match rows.iter().find(|row| !samples.contains_key(row.key())) {
        Some(orphan) => Err(CardLiveError::InconsistentDataset(format!(
            "{} row references unknown sample '{}'",
            R::CATEGORY,
            orphan.key()
        ))),
        None => Ok(()),
    }
}

fn retain_keys<R: CategoryRow>(rows: &[R], keys: &BTreeSet<SampleKey>) -> Vec<R> {
    rows.iter()
        .filter(|row| keys.contains(row.key()))
        .cloned()
        .collect()
}

fn group_rows<R: CategoryRow>(rows: &[R]) -> BTreeMap<&SampleKey, Vec<&R>> {
    let mut grouped: BTreeMap<&SampleKey, Vec<&R>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.key()).or_default().push(row);
    }
    grouped
}
