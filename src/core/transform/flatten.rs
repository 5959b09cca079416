//! Flattening of sample reports
//!
//! Two flattening steps turn a nested report into table rows:
//! - scalar top-level fields, where nested objects become dotted names
//!   (`{"rgi_parameters": {"loose": true}}` → `"rgi_parameters.loose"`)
//! - category hit lists, where every list element becomes one row and
//!   missing-value sentinels become null

use crate::domain::category::{AnalysisCategory, CategoryStatus};
use crate::domain::fields::FieldMap;
use serde_json::{Map, Value};

/// Column name of a category field: `<category>.<key>`
///
/// ```
/// use cardlive::core::transform::flatten::column_name;
/// use cardlive::domain::AnalysisCategory;
///
/// assert_eq!(column_name(AnalysisCategory::RgiMain, "cut_off"), "rgi_main.cut_off");
/// ```
pub fn column_name(category: AnalysisCategory, key: &str) -> String {
    format!("{}.{}", category.field_name(), key)
}

/// Flatten a JSON object into dotted field names
///
/// Keys listed in `skip` are left out at the top level. Arrays and scalars are
/// kept as they are.
pub fn flatten_object(object: &Map<String, Value>, skip: &[&str]) -> FieldMap {
    let mut fields = FieldMap::new();
    for (key, value) in object {
        if skip.contains(&key.as_str()) {
            continue;
        }
        flatten_into(&mut fields, key, value);
    }
    fields
}

fn flatten_into(fields: &mut FieldMap, path: &str, value: &Value) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, nested) in map {
                flatten_into(fields, &format!("{path}.{key}"), nested);
            }
        }
        other => {
            fields.insert(path.to_string(), other.clone());
        }
    }
}

/// Expand one category's hit list into per-hit field maps
///
/// Returns the category status alongside the rows:
/// - missing field or `null` → [`CategoryStatus::Absent`]
/// - `[]` → [`CategoryStatus::Empty`]
/// - `[{..}, ..]` → [`CategoryStatus::Present`] with one map per element
///
/// # Errors
///
/// Returns a reason string if the value is not a list, or an element is not an
/// object.
pub fn expand_hits(
    category: AnalysisCategory,
    value: Option<&Value>,
) -> Result<(CategoryStatus, Vec<FieldMap>), String> {
    let items = match value {
        None | Some(Value::Null) => return Ok((CategoryStatus::Absent, Vec::new())),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(format!(
                "field '{}' must be a list, got {}",
                category.field_name(),
                json_type(other)
            ))
        }
    };

    if items.is_empty() {
        return Ok((CategoryStatus::Empty, Vec::new()));
    }

    let sentinel = category.missing_sentinel();
    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), replace_sentinel(v, sentinel)))
                .collect()),
            other => Err(format!(
                "element {i} of '{}' must be an object, got {}",
                category.field_name(),
                json_type(other)
            )),
        })
        .collect::<Result<Vec<FieldMap>, String>>()?;

    Ok((CategoryStatus::Present(rows.len()), rows))
}

fn replace_sentinel(value: &Value, sentinel: &str) -> Value {
    match value {
        Value::String(s) if s == sentinel => Value::Null,
        other => other.clone(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(AnalysisCategory::Lmat, "count"), "lmat.count");
        assert_eq!(
            column_name(AnalysisCategory::Mlst, "sequence_type"),
            "mlst.sequence_type"
        );
    }

    #[test]
    fn test_flatten_object_nested() {
        let doc = json!({
            "timestamp": "2020-01-01",
            "rgi_main": [],
            "rgi_parameters": {"include_loose": false, "exclude_nudge": true},
            "empty": {}
        });
        let fields = flatten_object(doc.as_object().unwrap(), &["rgi_main"]);

        assert_eq!(fields["timestamp"], "2020-01-01");
        assert_eq!(fields["rgi_parameters.include_loose"], false);
        assert_eq!(fields["rgi_parameters.exclude_nudge"], true);
        assert_eq!(fields["empty"], json!({}));
        assert!(!fields.contains_key("rgi_main"));
    }

    #[test]
    fn test_expand_hits_absent_and_null() {
        let (status, rows) = expand_hits(AnalysisCategory::RgiMain, None).unwrap();
        assert_eq!(status, CategoryStatus::Absent);
        assert!(rows.is_empty());

        let (status, _) = expand_hits(AnalysisCategory::RgiMain, Some(&json!(null))).unwrap();
        assert_eq!(status, CategoryStatus::Absent);
    }

    #[test]
    fn test_expand_hits_empty_list() {
        let (status, rows) = expand_hits(AnalysisCategory::Lmat, Some(&json!([]))).unwrap();
        assert_eq!(status, CategoryStatus::Empty);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_expand_hits_replaces_category_sentinel() {
        let hits = json!([
            {"scheme": "ecoli", "sequence_type": "-", "adk": "n/a"},
            {"scheme": "-", "sequence_type": "73"}
        ]);
        let (status, rows) = expand_hits(AnalysisCategory::Mlst, Some(&hits)).unwrap();

        assert_eq!(status, CategoryStatus::Present(2));
        assert_eq!(rows[0]["sequence_type"], Value::Null);
        // "n/a" is not the sentinel for sequence typing
        assert_eq!(rows[0]["adk"], "n/a");
        assert_eq!(rows[1]["scheme"], Value::Null);
        assert_eq!(rows[1]["sequence_type"], "73");
    }

    #[test]
    fn test_expand_hits_rgi_sentinel() {
        let hits = json!([{"cut_off": "Strict", "best_hit_aro": "n/a"}]);
        let (_, rows) = expand_hits(AnalysisCategory::RgiMain, Some(&hits)).unwrap();
        assert_eq!(rows[0]["best_hit_aro"], Value::Null);
        assert_eq!(rows[0]["cut_off"], "Strict");
    }

    #[test]
    fn test_expand_hits_rejects_bad_shapes() {
        assert!(expand_hits(AnalysisCategory::RgiMain, Some(&json!("n/a"))).is_err());
        assert!(expand_hits(AnalysisCategory::RgiMain, Some(&json!({"a": 1}))).is_err());
        let err = expand_hits(AnalysisCategory::Lmat, Some(&json!([{"a": 1}, 5]))).unwrap_err();
        assert!(err.contains("element 1"));
    }
}
