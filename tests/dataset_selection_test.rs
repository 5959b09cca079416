//! Integration tests for loading, correcting and selecting a dataset
//!
//! Fixtures are written to temporary directories and loaded through the public
//! API the same way the host application does.

use cardlive::core::dataset::{Dataset, Selection};
use cardlive::core::load::RecordLoader;
use cardlive::core::modifiers::{AntarcticaCorrector, DatasetModifier, TaxonomyEnricher};
use cardlive::domain::{AnalysisCategory, CardLiveError, SampleKey};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

fn write_json(dir: &TempDir, name: &str, value: serde_json::Value) {
    fs::write(dir.path().join(name), value.to_string()).unwrap();
}

fn keys(names: &[&str]) -> BTreeSet<SampleKey> {
    names.iter().map(|n| SampleKey::new(*n).unwrap()).collect()
}

fn geo_of(data: &Dataset, name: &str) -> i64 {
    data.sample(&SampleKey::new(name).unwrap())
        .unwrap()
        .geo_area_code
}

/// Every table of `data` references only keys of its sample table
fn assert_shared_key_space(data: &Dataset) {
    let files = data.files();
    assert!(data.rgi_calls().iter().all(|r| files.contains(&r.key)));
    assert!(data.rgi_kmer().iter().all(|r| files.contains(&r.key)));
    assert!(data.mlst().iter().all(|r| files.contains(&r.key)));
    assert!(data.lmat().iter().all(|r| files.contains(&r.key)));
    assert!(data.rgi_index().files().is_subset(&files));
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "sample-a",
        json!({
            "timestamp": "2020-02-10T08:30:00",
            "geo_area_code": 124,
            "rgi_main": [
                {"cut_off": "Perfect", "drug_class": "fluoroquinolone antibiotic", "best_hit_aro": "gyrA", "model_type": "protein variant model"},
                {"cut_off": "Strict", "drug_class": "penam; cephalosporin", "best_hit_aro": "TEM-1"}
            ],
            "rgi_kmer": [{"taxonomy_label": "Escherichia coli"}],
            "mlst": [{"scheme": "ecoli", "sequence_type": "131", "adk": "53"}],
            "lmat": [{"taxonomy_label": "Escherichia coli", "count": 1200}]
        }),
    );
    write_json(
        &dir,
        "sample-b",
        json!({
            "timestamp": "2020-05-01",
            "geo_area_code": 840,
            "rgi_main": [{"cut_off": "Strict", "drug_class": ["tetracycline antibiotic"], "best_hit_aro": "tetA"}],
            "mlst": [{"scheme": "-", "sequence_type": "-"}],
            "lmat": [{"taxonomy_label": "n/a"}]
        }),
    );
    write_json(
        &dir,
        "sample-c",
        json!({
            "timestamp": "2020-09-15",
            "geo_area_code": 124,
            "rgi_main": [],
            "rgi_kmer": [{"taxonomy_label": "Klebsiella pneumoniae"}]
        }),
    );
    dir
}

#[test]
fn test_end_to_end_two_files() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "file1",
        json!({
            "timestamp": "2020-01-01",
            "geo_area_code": 10,
            "rgi_main": [{"cutoff": "Perfect", "drug_class": ["fluoroquinolone"], "best_hit_aro": "X"}]
        }),
    );
    write_json(
        &dir,
        "file2",
        json!({"timestamp": "2020-06-01", "geo_area_code": 10, "rgi_main": []}),
    );

    let data = RecordLoader::new(dir.path()).read_data().unwrap();
    let data = AntarcticaCorrector::from_cutoff("2020-03-01")
        .unwrap()
        .modify(&data)
        .unwrap();

    assert_eq!(geo_of(&data, "file1"), -10);
    assert_eq!(geo_of(&data, "file2"), 10);
    assert_eq!(data.samples_count(), 2);

    let selection = Selection::parse("rgi", "cutoff", &["perfect"]).unwrap();
    assert_eq!(data.select(&selection).files(), keys(&["file1"]));
}

#[test]
fn test_loaded_tables_share_key_space() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    assert_eq!(data.samples_count(), 3);
    assert_eq!(data.rgi_calls().len(), 3);
    assert_eq!(data.rgi_kmer().len(), 2);
    assert_eq!(data.mlst().len(), 2);
    assert_eq!(data.lmat().len(), 2);
    assert_shared_key_space(&data);
}

#[test]
fn test_missing_value_sentinels_become_null() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    let b = SampleKey::new("sample-b").unwrap();
    let mlst = data.mlst().iter().find(|r| r.key == b).unwrap();
    assert_eq!(mlst.scheme, None);
    assert_eq!(mlst.sequence_type, None);

    let lmat = data.lmat().iter().find(|r| r.key == b).unwrap();
    assert_eq!(lmat.taxonomy_label, None);
}

#[test]
fn test_analysis_valid_markers() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();
    let marker = |name: &str| {
        data.sample(&SampleKey::new(name).unwrap())
            .unwrap()
            .analysis_valid
            .clone()
    };

    assert_eq!(marker("sample-a"), "all");
    assert_eq!(marker("sample-b"), "rgi_main and mlst and lmat");
    assert_eq!(marker("sample-c"), "rgi_kmer");
}

#[test_case(&["sample-a", "sample-c"] ; "subset")]
#[test_case(&["sample-b", "unknown"] ; "with unknown key")]
#[test_case(&[] ; "empty")]
#[test_case(&["sample-a", "sample-b", "sample-c"] ; "all")]
fn test_select_by_files_is_intersection(requested: &[&str]) {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();
    let requested = keys(requested);

    let selected = data.select_by_files(&requested);
    let expected: BTreeSet<SampleKey> = requested.intersection(&data.files()).cloned().collect();

    assert_eq!(selected.files(), expected);
    assert_shared_key_space(&selected);
}

#[test]
fn test_select_by_own_files_is_identity() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();
    assert_eq!(data.select_by_files(&data.files()), data);
}

#[test_case("cutoff", &["strict"], &["sample-a", "sample-b"] ; "cutoff strict")]
#[test_case("cutoff", &["PERFECT"], &["sample-a"] ; "cutoff case insensitive")]
#[test_case("cutoff", &["all"], &["sample-a", "sample-b", "sample-c"] ; "cutoff all")]
#[test_case("drug_class", &["cephalosporin"], &["sample-a"] ; "drug class from delimited string")]
#[test_case("drug_class", &["tetracycline antibiotic"], &["sample-b"] ; "drug class from array")]
#[test_case("best_hit_aro", &["tetA", "gyrA"], &["sample-a", "sample-b"] ; "best hit aro")]
fn test_rgi_selections(by: &str, values: &[&str], expected: &[&str]) {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    let selected = data.select(&Selection::parse("rgi", by, values).unwrap());
    assert_eq!(selected.files(), keys(expected));
    assert_shared_key_space(&selected);
}

#[test]
fn test_rgi_selections_compose_as_intersection() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    let strict = Selection::parse("rgi", "cutoff", &["strict"]).unwrap();
    let class = Selection::parse("rgi", "drug_class", &["tetracycline antibiotic"]).unwrap();

    let composed = data.select(&strict).select(&class);
    let expected: BTreeSet<SampleKey> = data
        .select(&strict)
        .files()
        .intersection(&data.select(&class).files())
        .cloned()
        .collect();

    assert_eq!(composed.files(), expected);
    assert_eq!(composed.files(), keys(&["sample-b"]));
}

#[test]
fn test_time_selection_then_counts() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    let window = Selection::parse("main", "time", &["2020-02-01", "2020-06-30"]).unwrap();
    let selected = data.select(&window);
    assert_eq!(selected.files(), keys(&["sample-a", "sample-b"]));

    let counts = selected.value_counts(&["geo_area_code"], None);
    assert_eq!(counts.get(&["124"]), 1);
    assert_eq!(counts.get(&["840"]), 1);
    assert_eq!(selected.latest_update().unwrap().to_string(), "2020-05-01 00:00:00");
}

#[test]
fn test_value_counts_with_joined_table() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();

    let counts = data.value_counts(
        &["geo_area_code", "mlst.sequence_type"],
        Some(AnalysisCategory::Mlst),
    );

    // sample-b has a null sequence type and sample-c has no typing row
    assert_eq!(counts.total(), 1);
    assert_eq!(counts.get(&["124", "131"]), 1);
}

#[test]
fn test_value_counts_on_enriched_taxonomy() {
    let dir = fixture_dir();
    let data = RecordLoader::new(dir.path()).read_data().unwrap();
    let data = TaxonomyEnricher::new().modify(&data).unwrap();

    let counts = data.value_counts(&["rgi_kmer_taxonomy"], None);
    assert_eq!(counts.get(&["Escherichia coli"]), 1);
    assert_eq!(counts.get(&["Klebsiella pneumoniae"]), 1);
    assert_eq!(counts.total(), 2);
}

#[test]
fn test_selection_errors() {
    assert!(matches!(
        Selection::parse("rgi", "resistance_mechanism", &["efflux"]),
        Err(CardLiveError::UnsupportedSelector(_))
    ));
    assert!(matches!(
        Selection::parse("lmat", "taxonomy_label", &["x"]),
        Err(CardLiveError::UnknownSelector { .. })
    ));
}

#[test]
fn test_malformed_file_fails_whole_load() {
    let dir = fixture_dir();
    write_json(&dir, "sample-d", json!({"geo_area_code": 4}));

    let err = RecordLoader::new(dir.path()).read_data().unwrap_err();
    assert!(matches!(err, CardLiveError::MalformedRecord { ref file, .. } if file == "sample-d"));
}
