//! Normalization of sample reports
//!
//! This module turns one parsed JSON report into a [`SampleRecord`] and the
//! typed rows of the four category tables.

pub mod flatten;

use crate::domain::category::{AnalysisCategory, CategoryStatuses};
use crate::domain::hits::{
    CategoryRow, KmerTaxonomyRow, ResistanceCall, SequenceTypeRow, WholeReadTaxonomyRow,
};
use crate::domain::ids::SampleKey;
use crate::domain::sample::columns;
use crate::domain::time::parse_timestamp;
use crate::domain::{CardLiveError, Result, SampleRecord};
use serde_json::{Map, Value};

/// Everything one sample report contributes to a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSample {
    pub record: SampleRecord,
    pub rgi_main: Vec<ResistanceCall>,
    pub rgi_kmer: Vec<KmerTaxonomyRow>,
    pub mlst: Vec<SequenceTypeRow>,
    pub lmat: Vec<WholeReadTaxonomyRow>,
}

/// Normalize a sample report
///
/// # Arguments
///
/// * `key` - Sample key derived from the file name
/// * `document` - The parsed JSON document
///
/// # Errors
///
/// Returns [`CardLiveError::MalformedRecord`] if the document is not an object,
/// `timestamp` or `geo_area_code` are missing or unparsable, or a category list
/// has the wrong shape.
///
/// # Examples
///
/// ```
/// use cardlive::core::transform::parse_sample;
/// use cardlive::domain::SampleKey;
/// use serde_json::json;
///
/// let doc = json!({
///     "timestamp": "2020-01-01",
///     "geo_area_code": 10,
///     "rgi_main": [{"cut_off": "Perfect", "best_hit_aro": "X"}]
/// });
/// let parsed = parse_sample(SampleKey::new("file1").unwrap(), &doc).unwrap();
/// assert_eq!(parsed.rgi_main.len(), 1);
/// assert_eq!(parsed.record.analysis_valid, "rgi_main");
/// ```
pub fn parse_sample(key: SampleKey, document: &Value) -> Result<ParsedSample> {
    let object = document.as_object().ok_or_else(|| {
        CardLiveError::malformed(key.as_str(), "document is not a JSON object")
    })?;

    let timestamp = required_timestamp(&key, object)?;
    let geo_area_code = required_geo_area_code(&key, object)?;

    let mut statuses = CategoryStatuses::default();
    let rgi_main = expand::<ResistanceCall>(&key, object, &mut statuses)?;
    let rgi_kmer = expand::<KmerTaxonomyRow>(&key, object, &mut statuses)?;
    let mlst = expand::<SequenceTypeRow>(&key, object, &mut statuses)?;
    let lmat = expand::<WholeReadTaxonomyRow>(&key, object, &mut statuses)?;

    let mut skip: Vec<&str> = AnalysisCategory::ALL.iter().map(|c| c.field_name()).collect();
    skip.extend([columns::FILENAME, columns::TIMESTAMP, columns::GEO_AREA_CODE]);
    let fields = flatten::flatten_object(object, &skip);

    let record = SampleRecord::new(key, timestamp, geo_area_code, statuses, fields);

    Ok(ParsedSample {
        record,
        rgi_main,
        rgi_kmer,
        mlst,
        lmat,
    })
}

fn expand<R: CategoryRow>(
    key: &SampleKey,
    object: &Map<String, Value>,
    statuses: &mut CategoryStatuses,
) -> Result<Vec<R>> {
    let category = R::CATEGORY;
    let (status, hits) = flatten::expand_hits(category, object.get(category.field_name()))
        .map_err(|reason| CardLiveError::malformed(key.as_str(), reason))?;
    statuses.set(category, status);

    hits.into_iter()
        .map(|fields| {
            R::from_fields(key.clone(), fields)
                .map_err(|reason| CardLiveError::malformed(key.as_str(), reason))
        })
        .collect()
}

fn required_timestamp(
    key: &SampleKey,
    object: &Map<String, Value>,
) -> Result<chrono::NaiveDateTime> {
    match object.get(columns::TIMESTAMP) {
        Some(Value::String(s)) => {
            parse_timestamp(s).map_err(|reason| CardLiveError::malformed(key.as_str(), reason))
        }
        Some(other) => Err(CardLiveError::malformed(
            key.as_str(),
            format!("timestamp must be a string, got {other}"),
        )),
        None => Err(CardLiveError::malformed(key.as_str(), "missing timestamp")),
    }
}

fn required_geo_area_code(key: &SampleKey, object: &Map<String, Value>) -> Result<i64> {
    let value = object
        .get(columns::GEO_AREA_CODE)
        .ok_or_else(|| CardLiveError::malformed(key.as_str(), "missing geo_area_code"))?;

    let code = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    code.ok_or_else(|| {
        CardLiveError::malformed(
            key.as_str(),
            format!("geo_area_code is not an integer: {value}"),
        )
    })
}
