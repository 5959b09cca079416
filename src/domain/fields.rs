//! Helpers for pulling typed values out of flattened JSON fields

use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened JSON fields of one row, keyed by source key
pub type FieldMap = BTreeMap<String, Value>;

/// Render a scalar JSON value the way it appears in a table cell
///
/// Null renders as `None`; arrays are joined with `"; "`.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(render_value)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Remove the first of `names` present in `fields` and render it as text
pub fn take_text(fields: &mut FieldMap, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| fields.remove(*name))
        .and_then(|v| render_value(&v))
}

/// Remove `name` from `fields` and read it as a number
///
/// Numeric strings are accepted. Anything else non-null is an error.
pub fn take_number(fields: &mut FieldMap, name: &str) -> Result<Option<f64>, String> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("field '{name}' is not numeric: '{s}'")),
        Some(other) => Err(format!("field '{name}' is not numeric: {other}")),
    }
}

/// Remove `name` from `fields` and read it as a list of strings
///
/// Accepts a JSON array or a `;`-separated string. Entries are trimmed and
/// blanks dropped.
pub fn take_list(fields: &mut FieldMap, name: &str) -> Vec<String> {
    let raw: Vec<String> = match fields.remove(name) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(render_value).collect(),
        Some(Value::String(s)) => s.split(';').map(str::to_string).collect(),
        Some(other) => render_value(&other).into_iter().collect(),
    };

    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
