//!
//! Null safe extraction of typed values from generic JSON payloads.
//!
//! Jira and Tempo return records where almost any field may be absent or
//! `null`. Extraction therefore never fails for missing input; only a
//! non-null value of the wrong shape is an error, and only for date/time
//! fields, which have no safe default.
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::{JiraError, Result};

/// Pattern of the native Jira REST API, ISO-8601 with an optional
/// fractional part, e.g. `2024-02-01T10:00:00.000+0000`.
pub const JIRA_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Tempo's millisecond precision pattern, e.g. `2016-07-04T09:35:03.000+0000`.
pub const TEMPO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// String form of a scalar, `None` for null, absent and non-scalar input.
#[must_use]
pub fn get_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer form of a numeric scalar.
///
/// Returns `0` for null, absent and non-numeric input, so callers cannot
/// tell "explicitly zero" from "missing". Kept for compatibility with the
/// historical consumers of these payloads; use [`get_integer_opt`] where
/// the distinction matters.
#[must_use]
pub fn get_integer(value: Option<&Value>) -> i64 {
    get_integer_opt(value).unwrap_or(0)
}

/// Integer form of a numeric scalar, `None` for null, absent and
/// non-numeric input.
#[must_use]
pub fn get_integer_opt(value: Option<&Value>) -> Option<i64> {
    value.and_then(Value::as_i64)
}

/// Parses a date/time string with the given pattern.
///
/// Null and absent input yield `Ok(None)`. A non-null string that does not
/// match the pattern is an error; there is no fallback value.
pub fn get_datetime(value: Option<&Value>, format: &str) -> Result<Option<DateTime<FixedOffset>>> {
    match value {
        Some(Value::String(s)) => DateTime::parse_from_str(s, format)
            .map(Some)
            .map_err(|source| JiraError::DateParse {
                value: s.clone(),
                source,
            }),
        _ => Ok(None),
    }
}

/// Constructs a nested resource from a JSON object via `construct`.
///
/// Anything other than an object yields `None`; there is no partial
/// construction from scalar or array input.
pub fn get_resource<T, F>(value: Option<&Value>, construct: F) -> Result<Option<T>>
where
    F: FnOnce(&Value) -> Result<T>,
{
    match value {
        Some(v @ Value::Object(_)) => construct(v).map(Some),
        _ => Ok(None),
    }
}

/// Maps each element of a JSON array through the single resource
/// constructor, preserving order. Null and absent input yield an empty
/// vector.
pub fn get_resource_array<T, F>(value: Option<&Value>, construct: F) -> Result<Vec<T>>
where
    F: Fn(&Value) -> Result<T>,
{
    match value {
        Some(Value::Array(elements)) => elements.iter().map(construct).collect(),
        _ => Ok(Vec::new()),
    }
}
