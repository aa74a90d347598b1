//!
//! Work logs as reported by the Tempo timesheet plugin.
use std::fmt::{self, Formatter};

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use super::core::{same_resource, Author};
use crate::{config::RestConfig, fields, models::WorklogResource, Result};

/// A work log entry fetched from
/// `/rest/tempo-timesheets/{rev}/issue/{key}/worklog` or from the
/// `worklogs/` collection.
///
/// Two notions of equality exist and must not be conflated: `==` is
/// identity on the `self` URL, [`TempoWorklog::is_duplicate`] is content
/// based and exists to reconcile records across endpoints.
#[derive(Debug, Clone)]
pub struct TempoWorklog {
    pub self_url: Option<String>,
    pub id: Option<i64>,
    pub time_spent_seconds: i64,
    pub date_started: Option<DateTime<FixedOffset>>,
    pub comment: Option<String>,
    pub author: Option<Author>,
    /// Issue back reference: present in the payload but not mapped.
    pub issue: Option<String>,
    pub summary: Option<String>,
}

impl WorklogResource for TempoWorklog {
    const DATETIME_FORMAT: &'static str = fields::TEMPO_DATETIME_FORMAT;

    fn family_base(config: &RestConfig) -> String {
        config.tempo_base()
    }

    fn format_started(started: DateTime<Utc>) -> String {
        started.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
    }

    fn from_json(value: &Value) -> Result<Self> {
        Ok(TempoWorklog {
            time_spent_seconds: fields::get_integer(value.get("timeSpentSeconds")),
            date_started: fields::get_datetime(value.get("dateStarted"), Self::DATETIME_FORMAT)?,
            comment: fields::get_string(value.get("comment")),
            self_url: fields::get_string(value.get("self")),
            id: fields::get_integer_opt(value.get("id")),
            author: fields::get_resource(value.get("author"), Author::from_json)?,
            issue: None,
            summary: fields::get_string(value.get("summary")),
        })
    }

    fn to_display_string(&self) -> String {
        format!(
            "worklog{{author: {:?}, timeSpentSeconds: {}, dateStarted: {:?}, comment: {:?}, id: {:?}, summary: {:?}, self: {:?}}}",
            self.author.as_ref().map(Author::to_display_string),
            self.time_spent_seconds,
            self.date_started,
            self.comment,
            self.id,
            self.summary,
            self.self_url
        )
    }
}

impl TempoWorklog {
    /// Content based comparison used to detect that two records describe
    /// the same underlying time entry.
    ///
    /// Records fetched from the native and the Tempo endpoint never share
    /// a `self` URL, so identity comparison cannot spot the overlap; this
    /// compares the describing fields instead: `time_spent_seconds` must
    /// match exactly and every other field must be safely equal — both
    /// missing, or both present and equal.
    #[must_use]
    pub fn is_duplicate(&self, other: &TempoWorklog) -> bool {
        self.time_spent_seconds == other.time_spent_seconds
            && safe_eq(&self.date_started, &other.date_started)
            && safe_eq(&self.comment, &other.comment)
            && safe_eq(&self.summary, &other.summary)
            && safe_eq(&self.author, &other.author)
    }
}

// Both missing, or both present and equal.
fn safe_eq<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}

/// Prints the canonical identity, the `self` URL.
impl fmt::Display for TempoWorklog {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.self_url.as_deref().unwrap_or_default())
    }
}

impl PartialEq for TempoWorklog {
    fn eq(&self, other: &Self) -> bool {
        same_resource(self.self_url.as_deref(), other.self_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn payload(self_url: &str) -> Value {
        json!({
            "self": self_url,
            "id": 42,
            "timeSpentSeconds": 3600,
            "dateStarted": "2016-07-04T09:35:03.000+0000",
            "comment": "fixed bug",
            "author": {
                "self": "http://jira/rest/api/3/user?username=alice",
                "name": "alice",
                "displayName": "Alice A",
                "avatar": "http://jira/avatar/alice.png"
            },
            "summary": "The issue summary"
        })
    }

    fn worklog(self_url: &str) -> TempoWorklog {
        TempoWorklog::from_json(&payload(self_url)).unwrap()
    }

    #[test]
    fn deserialises_a_full_payload() {
        let worklog = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        assert_eq!(worklog.id, Some(42));
        assert_eq!(worklog.time_spent_seconds, 3600);
        assert_eq!(
            worklog.date_started.unwrap(),
            Utc.with_ymd_and_hms(2016, 7, 4, 9, 35, 3).unwrap()
        );
        assert_eq!(worklog.summary.as_deref(), Some("The issue summary"));
        assert!(worklog.issue.is_none());
        assert_eq!(worklog.author.unwrap().name.as_deref(), Some("alice"));
    }

    #[test]
    fn duplicate_detection_is_symmetric() {
        let a = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        let mut b = worklog("http://jira/rest/api/3/issue/10002/worklog/10101");
        assert_eq!(a.is_duplicate(&b), b.is_duplicate(&a));

        b.comment = Some("something else".to_string());
        assert_eq!(a.is_duplicate(&b), b.is_duplicate(&a));
        assert!(!a.is_duplicate(&b));
    }

    #[test]
    fn a_fully_populated_worklog_duplicates_itself() {
        let a = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        assert!(a.is_duplicate(&a));
    }

    #[test]
    fn identity_and_content_equality_disagree_across_sources() {
        let tempo_sourced = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        let native_sourced = worklog("http://jira/rest/api/3/issue/10002/worklog/10101");

        assert!(tempo_sourced != native_sourced);
        assert!(tempo_sourced.is_duplicate(&native_sourced));

        let same_record = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        assert!(tempo_sourced == same_record);
    }

    #[test]
    fn missing_fields_must_be_missing_on_both_sides() {
        let a = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        let mut b = worklog("http://jira/rest/tempo-timesheets/3/worklogs/43");
        b.summary = None;
        assert!(!a.is_duplicate(&b));

        let mut c = a.clone();
        c.summary = None;
        assert!(c.is_duplicate(&b));
    }

    #[test]
    fn authors_without_identity_block_duplicate_detection() {
        let mut a = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        let mut b = worklog("http://jira/rest/api/3/issue/10002/worklog/10101");
        if let Some(author) = a.author.as_mut() {
            author.self_url = None;
        }
        if let Some(author) = b.author.as_mut() {
            author.self_url = None;
        }
        // Present on both sides but without identity, so never safely equal.
        assert!(!a.is_duplicate(&b));

        a.author = None;
        b.author = None;
        assert!(a.is_duplicate(&b));
    }

    #[test]
    fn a_missing_self_url_is_never_identical() {
        let mut a = worklog("http://jira/rest/tempo-timesheets/3/worklogs/42");
        a.self_url = None;
        assert!(a != a.clone());
    }
}
