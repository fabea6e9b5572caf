//! Default-producing lookups over loosely shaped JSON.
//!
//! Template documents are written by several generations of Power BI and
//! omit fields freely. Every fallback the extractors rely on goes through
//! one of these helpers so that the default is explicit at the call site.

use serde_json::{Number, Value};

/// Follows `path` through nested objects.
pub(crate) fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Array at `path`, or an empty slice when absent or not an array.
pub(crate) fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub(crate) fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    at(value, path).and_then(Value::as_str)
}

/// String field `key`, or `default` when absent or not a string.
pub(crate) fn str_or<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    str_at(value, &[key]).unwrap_or(default)
}

/// Numeric field `key`, or zero when absent or not a number.
pub(crate) fn number_or_zero(value: &Value, key: &str) -> Number {
    match value.get(key) {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(0),
    }
}

/// Expression text stored either as one string or as a list of fragments.
///
/// Fragments are joined with a single space; empty and non-string fragments
/// are dropped.
pub(crate) fn expression_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter_map(Value::as_str)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}
