//!
//! Domain models for the two work log dialects.
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{config::RestConfig, models::worklog::Insert, JiraError, RestClient, Result};

pub mod core;
pub mod tempo;
pub mod worklog;

/// A work log record backed by a REST endpoint.
///
/// The native and Tempo dialects expose the same operations on near
/// identical paths; what differs is the base path, the timestamp wire
/// format and the field set. Implementations supply those rules, the
/// trait supplies the request/response plumbing.
pub trait WorklogResource: Sized {
    /// Pattern used when parsing timestamps from this family's payloads.
    const DATETIME_FORMAT: &'static str;

    /// Base path of the family, including the configured API revision.
    fn family_base(config: &RestConfig) -> String;

    /// Wire form of a creation timestamp.
    fn format_started(started: DateTime<Utc>) -> String;

    /// Builds the typed record from a JSON object payload.
    fn from_json(value: &Value) -> Result<Self>;

    /// Verbose form for diagnostics.
    fn to_display_string(&self) -> String;

    /// Retrieves a single work log record.
    fn get(client: &dyn RestClient, issue_key: &str, worklog_id: &str) -> Result<Self> {
        let path = format!(
            "{}issue/{issue_key}/worklog/{worklog_id}",
            Self::family_base(client.config())
        );
        let context =
            || format!("failed to retrieve work log {worklog_id} on issue {issue_key}");

        let uri = client
            .build_uri(&path, &[])
            .map_err(|e| JiraError::transport(context(), e))?;
        let result = client
            .get(&uri)
            .map_err(|e| JiraError::transport(context(), e))?;

        expect_object(&result)?;
        Self::from_json(&result)
    }

    /// Creates a work log on the server and returns the stored record.
    fn create(
        client: &dyn RestClient,
        issue_key: &str,
        comment: &str,
        started: DateTime<Utc>,
        time_spent_seconds: i64,
    ) -> Result<Self> {
        let entry = Insert {
            comment: comment.to_string(),
            started: Self::format_started(started),
            time_spent_seconds,
        };
        let path = format!(
            "{}issue/{issue_key}/worklog",
            Self::family_base(client.config())
        );
        let context = || format!("failed to create work log on issue {issue_key}");

        let body = serde_json::to_value(&entry)
            .map_err(|e| JiraError::transport(context(), e.into()))?;
        let uri = client
            .build_uri(&path, &[])
            .map_err(|e| JiraError::transport(context(), e))?;
        let result = client
            .post(&uri, &body)
            .map_err(|e| JiraError::transport(context(), e))?;

        expect_object(&result)?;
        Self::from_json(&result)
    }
}

fn expect_object(value: &Value) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(JiraError::MalformedPayload("a JSON object"))
    }
}
