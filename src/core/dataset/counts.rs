//! Aggregate sample counts for chart data

use crate::domain::category::AnalysisCategory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Category table joined onto the sample table before counting
pub type IncludeTable = AnalysisCategory;

/// Number of samples per distinct combination of column values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    columns: Vec<String>,
    counts: BTreeMap<Vec<String>, usize>,
}

impl ValueCounts {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            counts: BTreeMap::new(),
        }
    }

    pub(crate) fn increment(&mut self, group: Vec<String>) {
        *self.counts.entry(group).or_insert(0) += 1;
    }

    /// Columns the counts are grouped by
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Count for one group, zero if absent
    pub fn get(&self, group: &[&str]) -> usize {
        let group: Vec<String> = group.iter().map(|s| s.to_string()).collect();
        self.counts.get(&group).copied().unwrap_or(0)
    }

    /// Groups and their counts in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&[String], usize)> {
        self.counts.iter().map(|(k, v)| (k.as_slice(), *v))
    }

    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of samples counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
