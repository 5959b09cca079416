//! Sample records
//!
//! One record per input file: the scalar fields of the report plus the
//! provenance derived while expanding the category lists.

use crate::domain::category::CategoryStatuses;
use crate::domain::fields::{render_value, FieldMap};
use crate::domain::ids::SampleKey;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Names of the columns every sample record carries
pub mod columns {
    pub const FILENAME: &str = "filename";
    pub const TIMESTAMP: &str = "timestamp";
    pub const GEO_AREA_CODE: &str = "geo_area_code";
    pub const ANALYSIS_VALID: &str = "analysis_valid";
    pub const RGI_KMER_TAXONOMY: &str = "rgi_kmer_taxonomy";
    pub const LMAT_TAXONOMY: &str = "lmat_taxonomy";
}

/// One row of the combined sample table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub key: SampleKey,
    pub timestamp: NaiveDateTime,
    pub geo_area_code: i64,
    /// Which categories produced data
    pub statuses: CategoryStatuses,
    /// Summary label derived from `statuses`
    pub analysis_valid: String,
    /// Label of the first k-mer prediction, set by the taxonomy enricher
    pub rgi_kmer_taxonomy: Option<String>,
    /// Label of the first whole-read classification, set by the taxonomy enricher
    pub lmat_taxonomy: Option<String>,
    /// Remaining scalar fields of the report, nested objects flattened to dotted names
    #[serde(default)]
    pub fields: FieldMap,
}

impl SampleRecord {
    /// Create a record; `analysis_valid` is derived from `statuses`
    pub fn new(
        key: SampleKey,
        timestamp: NaiveDateTime,
        geo_area_code: i64,
        statuses: CategoryStatuses,
        fields: FieldMap,
    ) -> Self {
        Self {
            key,
            timestamp,
            geo_area_code,
            analysis_valid: statuses.analysis_valid(),
            statuses,
            rgi_kmer_taxonomy: None,
            lmat_taxonomy: None,
            fields,
        }
    }

    /// Value of a column of the sample table
    pub fn column(&self, name: &str) -> Option<String> {
        match name {
            columns::FILENAME => Some(self.key.to_string()),
            columns::TIMESTAMP => Some(self.timestamp.to_string()),
            columns::GEO_AREA_CODE => Some(self.geo_area_code.to_string()),
            columns::ANALYSIS_VALID => Some(self.analysis_valid.clone()),
            columns::RGI_KMER_TAXONOMY => self.rgi_kmer_taxonomy.clone(),
            columns::LMAT_TAXONOMY => self.lmat_taxonomy.clone(),
            other => self.fields.get(other).and_then(render_value),
        }
    }
}
