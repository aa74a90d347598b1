//!
//! Work logs as reported by the native Jira endpoint.
use std::fmt::{self, Formatter};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::core::Author;
use crate::{config::RestConfig, fields, models::WorklogResource, Result};

/// A work log entry fetched from `/rest/api/{rev}/issue/{key}/worklog`.
///
/// Immutable once constructed from a payload; a changed work log is
/// represented by fetching or constructing a new value. The native
/// dialect has no update or delete operation and no duplicate detection.
#[derive(Debug, Clone)]
pub struct Worklog {
    pub self_url: Option<String>,
    pub id: Option<String>,
    pub author: Option<Author>,
    pub comment: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub update_author: Option<Author>,
    pub started: Option<DateTime<FixedOffset>>,
    /// Human readable duration, e.g. `1h 30m`.
    pub time_spent: Option<String>,
    pub time_spent_seconds: i64,
}

/// Request body for creating a work log entry. Both families accept the
/// same three fields; only the `started` wire format differs.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insert {
    pub comment: String,
    pub started: String,
    #[serde(rename = "timeSpentSeconds")]
    pub time_spent_seconds: i64,
}

impl WorklogResource for Worklog {
    const DATETIME_FORMAT: &'static str = fields::JIRA_DATETIME_FORMAT;

    fn family_base(config: &RestConfig) -> String {
        config.api_base()
    }

    fn format_started(started: DateTime<Utc>) -> String {
        // Jira wants minute precision in UTC with a literal Z suffix.
        started.format("%Y-%m-%dT%H:%MZ").to_string()
    }

    fn from_json(value: &Value) -> Result<Self> {
        Ok(Worklog {
            self_url: fields::get_string(value.get("self")),
            id: fields::get_string(value.get("id")),
            author: fields::get_resource(value.get("author"), Author::from_json)?,
            comment: fields::get_string(value.get("comment")),
            created: fields::get_datetime(value.get("created"), Self::DATETIME_FORMAT)?,
            updated: fields::get_datetime(value.get("updated"), Self::DATETIME_FORMAT)?,
            update_author: fields::get_resource(value.get("updateAuthor"), Author::from_json)?,
            started: fields::get_datetime(value.get("started"), Self::DATETIME_FORMAT)?,
            time_spent: fields::get_string(value.get("timeSpent")),
            time_spent_seconds: fields::get_integer(value.get("timeSpentSeconds")),
        })
    }

    fn to_display_string(&self) -> String {
        let created = self
            .created
            .map_or_else(|| "unknown".to_string(), |d| d.to_rfc3339());
        let author = self
            .author
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        format!("{created} by {author}")
    }
}

impl fmt::Display for Worklog {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
