//! # Assertion Module
//!
//! Field-level expectations over decoded models and raw JSON bodies.
//!
//! Every check returns `Result<(), AssertionFailure>` instead of panicking, so a
//! scenario can stop at the first unmet expectation and the suite runner can
//! report exactly which one it was. A failure always carries the field path,
//! the expected value and the actual value.
//!
//! ## JSON paths
//!
//! [`json_path`] resolves dotted paths such as `data.first_name` or
//! `data.0.id`. When a segment is applied to an array of objects the lookup is
//! projected over every element, so `data.id` against a users page yields the
//! list of ids:
//!
//! ```rust
//! use restverify::assertion::json_path;
//! use serde_json::json;
//!
//! let page = json!({"data": [{"id": 7}, {"id": 8}]});
//! assert_eq!(json_path(&page, "data.id"), Some(json!([7, 8])));
//! assert_eq!(json_path(&page, "data.1.id"), Some(json!(8)));
//! ```

use crate::validator::ValidationResult;
use regex::Regex;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::LazyLock;
use thiserror::Error;

/// Accepts `2024-01-31T12:34:56Z`, fractional seconds and numeric offsets.
/// Each field is range checked (second 60 allowed for leap seconds); day
/// counts per month are not.
#[allow(clippy::unwrap_used)]
static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])",
        r"T([01]\d|2[0-3]):[0-5]\d:([0-5]\d|60)(\.\d+)?",
        r"(Z|[+-]([01]\d|2[0-3]):?[0-5]\d)$",
    ))
    .unwrap()
});

/// An expectation about a response that was not met.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("assertion failed at `{path}`: expected {expected}, got {actual}")]
pub struct AssertionFailure {
    /// Field path or check name (`status`, `data.id`, `header:content-type`)
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Compare a decoded field against its expected value.
pub fn assert_field<T>(path: &str, expected: T, actual: T) -> Result<(), AssertionFailure>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            path,
            format!("{expected:?}"),
            format!("{actual:?}"),
        ))
    }
}

/// Require a server-assigned string field to be present and non-blank.
pub fn assert_non_empty(path: &str, actual: &str) -> Result<(), AssertionFailure> {
    if actual.trim().is_empty() {
        Err(AssertionFailure::new(path, "a non-empty value", format!("{actual:?}")))
    } else {
        Ok(())
    }
}

/// Require an ISO-8601 timestamp such as `2024-05-01T10:20:30.123Z`.
pub fn assert_timestamp(path: &str, actual: &str) -> Result<(), AssertionFailure> {
    if ISO_8601.is_match(actual) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            path,
            "an ISO-8601 timestamp",
            format!("{actual:?}"),
        ))
    }
}

/// Resolve a dotted path against a JSON value.
///
/// Numeric segments index into arrays; any other segment applied to an array
/// is projected over its elements. Returns `None` when a segment is missing.
pub fn json_path(value: &Value, path: &str) -> Option<Value> {
    let mut current = value.clone();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(mut map) => map.remove(segment)?,
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.into_iter().nth(index)?,
                Err(_) => Value::Array(
                    items
                        .iter()
                        .map(|item| item.get(segment).cloned())
                        .collect::<Option<Vec<_>>>()?,
                ),
            },
            _ => return None,
        };
    }
    Some(current)
}

/// Assert that `path` resolves to exactly `expected`.
pub fn assert_json_path(body: &Value, path: &str, expected: &Value) -> Result<(), AssertionFailure> {
    match json_path(body, path) {
        Some(actual) if &actual == expected => Ok(()),
        Some(actual) => Err(AssertionFailure::new(
            path,
            expected.to_string(),
            actual.to_string(),
        )),
        None => Err(AssertionFailure::new(path, expected.to_string(), "<missing>")),
    }
}

/// Assert that `path` resolves to an array containing every one of `items`,
/// in any order and possibly alongside other elements.
pub fn assert_has_items(body: &Value, path: &str, items: &[Value]) -> Result<(), AssertionFailure> {
    let expected = Value::Array(items.to_vec()).to_string();
    match json_path(body, path) {
        Some(Value::Array(actual)) => {
            if items.iter().all(|item| actual.contains(item)) {
                Ok(())
            } else {
                Err(AssertionFailure::new(
                    path,
                    format!("items {expected}"),
                    Value::Array(actual).to_string(),
                ))
            }
        }
        Some(other) => Err(AssertionFailure::new(
            path,
            format!("an array with items {expected}"),
            other.to_string(),
        )),
        None => Err(AssertionFailure::new(
            path,
            format!("items {expected}"),
            "<missing>",
        )),
    }
}

/// Turn a schema validation result into an assertion outcome.
pub fn assert_conforms(schema_name: &str, result: &ValidationResult) -> Result<(), AssertionFailure> {
    match result {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid(violations) => Err(AssertionFailure::new(
            format!("schema:{schema_name}"),
            "a conforming body",
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )),
    }
}
