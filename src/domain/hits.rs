//! Per-category row schemas
//!
//! Each analysis category expands into its own table with one row per hit.
//! Known keys map onto typed fields; anything else is kept in `extra` so no
//! source data is lost.

use crate::domain::category::AnalysisCategory;
use crate::domain::fields::{render_value, take_list, take_number, take_text, FieldMap};
use crate::domain::ids::SampleKey;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A row of one of the four category tables
pub trait CategoryRow: Clone + Debug + PartialEq + Send + Sync {
    /// Category this row belongs to
    const CATEGORY: AnalysisCategory;

    /// Build a row from one flattened hit
    ///
    /// Missing-value sentinels have already been replaced with null.
    fn from_fields(key: SampleKey, fields: FieldMap) -> Result<Self, String>;

    /// Sample this row belongs to
    fn key(&self) -> &SampleKey;

    /// Value of a field by its source key (without category prefix)
    fn field(&self, name: &str) -> Option<String>;

    /// Value of a column named `<category>.<key>`
    fn column(&self, column: &str) -> Option<String> {
        column
            .strip_prefix(Self::CATEGORY.field_name())
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|name| self.field(name))
    }
}

fn extra_field(extra: &FieldMap, name: &str) -> Option<String> {
    extra.get(name).and_then(render_value)
}

fn render_number(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// One resistance gene hit from the primary resistance caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceCall {
    pub key: SampleKey,
    /// Detection tier as reported (Perfect, Strict, Loose)
    pub cutoff: Option<String>,
    pub best_hit_aro: Option<String>,
    pub drug_class: Vec<String>,
    pub amr_gene_family: Option<String>,
    pub resistance_mechanism: Option<String>,
    pub model_type: Option<String>,
    pub best_identities: Option<f64>,
    #[serde(default)]
    pub extra: FieldMap,
}

impl ResistanceCall {
    /// Whether the cutoff matches `level`, ignoring case
    pub fn has_cutoff(&self, level: &str) -> bool {
        self.cutoff
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(level))
    }

    /// Whether the drug-class list contains `class`
    pub fn has_drug_class(&self, class: &str) -> bool {
        self.drug_class.iter().any(|c| c == class)
    }
}

impl CategoryRow for ResistanceCall {
    const CATEGORY: AnalysisCategory = AnalysisCategory::RgiMain;

    fn from_fields(key: SampleKey, mut fields: FieldMap) -> Result<Self, String> {
        Ok(Self {
            key,
            cutoff: take_text(&mut fields, &["cut_off", "cutoff"]),
            best_hit_aro: take_text(&mut fields, &["best_hit_aro"]),
            drug_class: take_list(&mut fields, "drug_class"),
            amr_gene_family: take_text(&mut fields, &["amr_gene_family"]),
            resistance_mechanism: take_text(&mut fields, &["resistance_mechanism"]),
            model_type: take_text(&mut fields, &["model_type"]),
            best_identities: take_number(&mut fields, "best_identities")?,
            extra: fields,
        })
    }

    fn key(&self) -> &SampleKey {
        &self.key
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "cut_off" | "cutoff" => self.cutoff.clone(),
            "best_hit_aro" => self.best_hit_aro.clone(),
            "drug_class" if self.drug_class.is_empty() => None,
            "drug_class" => Some(self.drug_class.join("; ")),
            "amr_gene_family" => self.amr_gene_family.clone(),
            "resistance_mechanism" => self.resistance_mechanism.clone(),
            "model_type" => self.model_type.clone(),
            "best_identities" => render_number(self.best_identities),
            other => extra_field(&self.extra, other),
        }
    }
}

/// One k-mer based prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmerTaxonomyRow {
    pub key: SampleKey,
    pub taxonomy_label: Option<String>,
    #[serde(default)]
    pub extra: FieldMap,
}

impl CategoryRow for KmerTaxonomyRow {
    const CATEGORY: AnalysisCategory = AnalysisCategory::RgiKmer;

    fn from_fields(key: SampleKey, mut fields: FieldMap) -> Result<Self, String> {
        Ok(Self {
            key,
            taxonomy_label: take_text(&mut fields, &["taxonomy_label"]),
            extra: fields,
        })
    }

    fn key(&self) -> &SampleKey {
        &self.key
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "taxonomy_label" => self.taxonomy_label.clone(),
            other => extra_field(&self.extra, other),
        }
    }
}

/// One whole-read classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholeReadTaxonomyRow {
    pub key: SampleKey,
    pub taxonomy_label: Option<String>,
    pub taxonomy_level: Option<String>,
    pub ncbi_taxon_id: Option<String>,
    pub count: Option<f64>,
    pub score: Option<f64>,
    #[serde(default)]
    pub extra: FieldMap,
}

impl CategoryRow for WholeReadTaxonomyRow {
    const CATEGORY: AnalysisCategory = AnalysisCategory::Lmat;

    fn from_fields(key: SampleKey, mut fields: FieldMap) -> Result<Self, String> {
        Ok(Self {
            key,
            taxonomy_label: take_text(&mut fields, &["taxonomy_label"]),
            taxonomy_level: take_text(&mut fields, &["taxonomy_level"]),
            ncbi_taxon_id: take_text(&mut fields, &["ncbi_taxon_id"]),
            count: take_number(&mut fields, "count")?,
            score: take_number(&mut fields, "score")?,
            extra: fields,
        })
    }

    fn key(&self) -> &SampleKey {
        &self.key
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "taxonomy_label" => self.taxonomy_label.clone(),
            "taxonomy_level" => self.taxonomy_level.clone(),
            "ncbi_taxon_id" => self.ncbi_taxon_id.clone(),
            "count" => render_number(self.count),
            "score" => render_number(self.score),
            other => extra_field(&self.extra, other),
        }
    }
}

/// One sequence typing result; allele calls stay in `extra`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceTypeRow {
    pub key: SampleKey,
    pub scheme: Option<String>,
    pub sequence_type: Option<String>,
    #[serde(default)]
    pub extra: FieldMap,
}

impl CategoryRow for SequenceTypeRow {
    const CATEGORY: AnalysisCategory = AnalysisCategory::Mlst;

    fn from_fields(key: SampleKey, mut fields: FieldMap) -> Result<Self, String> {
        Ok(Self {
            key,
            scheme: take_text(&mut fields, &["scheme"]),
            sequence_type: take_text(&mut fields, &["sequence_type"]),
            extra: fields,
        })
    }

    fn key(&self) -> &SampleKey {
        &self.key
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "scheme" => self.scheme.clone(),
            "sequence_type" => self.sequence_type.clone(),
            other => extra_field(&self.extra, other),
        }
    }
}
