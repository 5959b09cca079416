//! Analysis categories and per-sample provenance
//!
//! Each sample report carries up to four lists of hits, one per analysis tool.
//! This module names those categories and tracks, per sample, whether each one
//! produced data.

use crate::domain::{CardLiveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used when every category produced data
pub const ALL_ANALYSES_LABEL: &str = "all";

/// Label used when no category produced data
pub const NO_ANALYSES_LABEL: &str = "None";

/// One of the four fixed analysis categories
///
/// The declaration order is the canonical order used for the
/// `analysis_valid` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisCategory {
    /// Primary resistance gene calls
    RgiMain,
    /// K-mer based resistance calls and pathogen-of-origin prediction
    RgiKmer,
    /// Multi-locus sequence typing
    Mlst,
    /// Whole-read taxonomic classification
    Lmat,
}

impl AnalysisCategory {
    /// All categories in canonical order
    pub const ALL: [AnalysisCategory; 4] = [
        AnalysisCategory::RgiMain,
        AnalysisCategory::RgiKmer,
        AnalysisCategory::Mlst,
        AnalysisCategory::Lmat,
    ];

    /// Name of the JSON field holding this category's hit list
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::RgiMain => "rgi_main",
            Self::RgiKmer => "rgi_kmer",
            Self::Mlst => "mlst",
            Self::Lmat => "lmat",
        }
    }

    /// String the producing tool writes for a missing value
    pub fn missing_sentinel(&self) -> &'static str {
        match self {
            Self::Mlst => "-",
            Self::RgiMain | Self::RgiKmer | Self::Lmat => "n/a",
        }
    }

    fn position(&self) -> usize {
        match self {
            Self::RgiMain => 0,
            Self::RgiKmer => 1,
            Self::Mlst => 2,
            Self::Lmat => 3,
        }
    }
}

impl fmt::Display for AnalysisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for AnalysisCategory {
    type Err = CardLiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rgi_main" | "rgi" => Ok(Self::RgiMain),
            "rgi_kmer" => Ok(Self::RgiKmer),
            "mlst" => Ok(Self::Mlst),
            "lmat" => Ok(Self::Lmat),
            _ => Err(CardLiveError::Validation(format!(
                "Invalid analysis category: {s}. Expected one of: rgi_main, rgi_kmer, mlst, lmat"
            ))),
        }
    }
}

/// Whether a category's data was present in a sample report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// Field missing from the report or explicitly null
    Absent,
    /// The analysis ran but reported no hits
    Empty,
    /// The analysis reported this many hits
    Present(usize),
}

impl CategoryStatus {
    /// Whether the category contributes rows to its table
    pub fn has_data(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl Default for CategoryStatus {
    fn default() -> Self {
        Self::Absent
    }
}

/// Per-sample status of all four categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatuses([CategoryStatus; 4]);

impl CategoryStatuses {
    /// Status of a single category
    pub fn get(&self, category: AnalysisCategory) -> CategoryStatus {
        self.0[category.position()]
    }

    /// Record the status of a single category
    pub fn set(&mut self, category: AnalysisCategory, status: CategoryStatus) {
        self.0[category.position()] = status;
    }

    /// Categories with data, in canonical order
    pub fn present(&self) -> Vec<AnalysisCategory> {
        AnalysisCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c).has_data())
            .collect()
    }

    /// The `analysis_valid` label for this sample
    ///
    /// Present categories are joined with `" and "` in canonical order, with
    /// `"all"` when every category has data and `"None"` when none do.
    ///
    /// ```
    /// use cardlive::domain::category::{AnalysisCategory, CategoryStatus, CategoryStatuses};
    ///
    /// let mut statuses = CategoryStatuses::default();
    /// statuses.set(AnalysisCategory::Lmat, CategoryStatus::Present(1));
    /// statuses.set(AnalysisCategory::RgiMain, CategoryStatus::Present(3));
    /// assert_eq!(statuses.analysis_valid(), "rgi_main and lmat");
    /// ```
    pub fn analysis_valid(&self) -> String {
        let present = self.present();
        if present.is_empty() {
            NO_ANALYSES_LABEL.to_string()
        } else if present.len() == AnalysisCategory::ALL.len() {
            ALL_ANALYSES_LABEL.to_string()
        } else {
            present
                .iter()
                .map(|c| c.field_name())
                .collect::<Vec<_>>()
                .join(" and ")
        }
    }
}
