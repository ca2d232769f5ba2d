//! Issue records as returned by the tracker's search endpoint.
//!
//! Issues keep the tracker's raw field layout so a cached snapshot can be
//! reloaded without loss. Absent values are resolved when a field is read:
//! timestamps become `None`, names fall back to a fixed sentinel.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Assignee name used when an issue has no assignee.
pub const UNASSIGNED: &str = "Unassigned";
/// Reporter name used when an issue has no reporter.
pub const UNKNOWN_REPORTER: &str = "Unknown";
/// Priority name used when an issue has no priority.
pub const UNSET_PRIORITY: &str = "Unset";
/// Status name used when an issue has no status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Terminal statuses used when none are configured.
pub const DEFAULT_CLOSED_STATUSES: [&str; 3] = ["Closed", "Resolved", "Done"];

/// One tracked work item, snapshotted at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker key, e.g. `KAFKA-123`.
    pub key: String,
    /// Field values requested from the tracker.
    #[serde(default)]
    pub fields: IssueFields,
}

/// Raw fields of an issue. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Last-updated timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Resolution timestamp, absent until resolved.
    #[serde(default, rename = "resolutiondate", skip_serializing_if = "Option::is_none")]
    pub resolution_date: Option<String>,
    /// Workflow status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NamedField>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedField>,
    /// Assigned user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserField>,
    /// Reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<UserField>,
    /// Logged work in seconds.
    #[serde(default, rename = "timespent", skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<i64>,
}

/// A `{ "name": ... }` object such as a status or priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A user reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserField {
    /// Display name.
    #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Issue {
    /// Parsed creation timestamp.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        self.fields.created.as_deref().and_then(parse_timestamp)
    }

    /// Parsed last-updated timestamp.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<FixedOffset>> {
        self.fields.updated.as_deref().and_then(parse_timestamp)
    }

    /// Parsed resolution timestamp.
    #[must_use]
    pub fn resolved(&self) -> Option<DateTime<FixedOffset>> {
        self.fields.resolution_date.as_deref().and_then(parse_timestamp)
    }

    /// The status name, if the tracker reported one.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Status name, or [`UNKNOWN_STATUS`].
    #[must_use]
    pub fn status_or_unknown(&self) -> &str {
        self.status_name().unwrap_or(UNKNOWN_STATUS)
    }

    /// Priority name, or [`UNSET_PRIORITY`].
    #[must_use]
    pub fn priority_or_unset(&self) -> &str {
        self.fields.priority.as_ref().and_then(|p| p.name.as_deref()).unwrap_or(UNSET_PRIORITY)
    }

    /// Assignee display name, or [`UNASSIGNED`].
    #[must_use]
    pub fn assignee_or_unassigned(&self) -> &str {
        self.fields.assignee.as_ref().and_then(|u| u.display_name.as_deref()).unwrap_or(UNASSIGNED)
    }

    /// Reporter display name, or [`UNKNOWN_REPORTER`].
    #[must_use]
    pub fn reporter_or_unknown(&self) -> &str {
        self.fields
            .reporter
            .as_ref()
            .and_then(|u| u.display_name.as_deref())
            .unwrap_or(UNKNOWN_REPORTER)
    }

    /// Logged seconds when positive; zero and absent both yield `None`.
    #[must_use]
    pub fn time_spent_seconds(&self) -> Option<i64> {
        self.fields.time_spent.filter(|secs| *secs > 0)
    }
}

/// Terminal-status vocabulary that defines the closed subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedStatuses(Vec<String>);

impl ClosedStatuses {
    /// Builds a vocabulary from status names. Matching is exact.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the issue's status is terminal.
    #[must_use]
    pub fn contains(&self, issue: &Issue) -> bool {
        issue.status_name().is_some_and(|name| self.0.iter().any(|s| s == name))
    }

    /// Filters `issues` down to the closed subset, preserving order.
    #[must_use]
    pub fn closed_subset<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        issues.iter().filter(|issue| self.contains(issue)).collect()
    }

    /// The configured names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for ClosedStatuses {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSED_STATUSES)
    }
}

/// Parses a tracker timestamp.
///
/// Accepts the tracker's `2023-01-01T10:00:00.000+0000` form and RFC 3339.
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Fractional days between two instants.
#[must_use]
pub fn elapsed_days(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (to - from).num_milliseconds() as f64;
    millis / 1000.0 / 86_400.0
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Issue, IssueFields, NamedField, UserField};

    /// Builder for test issues.
    #[derive(Default)]
    pub struct IssueBuilder {
        issue: Issue,
    }

    impl IssueBuilder {
        pub fn new(key: &str) -> Self {
            Self { issue: Issue { key: key.to_string(), fields: IssueFields::default() } }
        }

        pub fn created(mut self, ts: &str) -> Self {
            self.issue.fields.created = Some(ts.to_string());
            self
        }

        pub fn updated(mut self, ts: &str) -> Self {
            self.issue.fields.updated = Some(ts.to_string());
            self
        }

        pub fn resolved(mut self, ts: &str) -> Self {
            self.issue.fields.resolution_date = Some(ts.to_string());
            self
        }

        pub fn status(mut self, name: &str) -> Self {
            self.issue.fields.status = Some(NamedField { name: Some(name.to_string()) });
            self
        }

        pub fn priority(mut self, name: &str) -> Self {
            self.issue.fields.priority = Some(NamedField { name: Some(name.to_string()) });
            self
        }

        pub fn assignee(mut self, name: &str) -> Self {
            self.issue.fields.assignee = Some(UserField { display_name: Some(name.to_string()) });
            self
        }

        pub fn reporter(mut self, name: &str) -> Self {
            self.issue.fields.reporter = Some(UserField { display_name: Some(name.to_string()) });
            self
        }

        pub fn time_spent(mut self, secs: i64) -> Self {
            self.issue.fields.time_spent = Some(secs);
            self
        }

        pub fn build(self) -> Issue {
            self.issue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::IssueBuilder;
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tracker_timestamp_format() {
        let ts = parse_timestamp("2023-01-01T10:00:00.000+0000").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-01T10:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let ts = parse_timestamp("2023-01-01T10:00:00+03:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn unparsable_timestamp_is_absent() {
        let issue = IssueBuilder::new("X-1").created("yesterday").build();
        assert!(issue.created().is_none());
    }

    #[test]
    fn elapsed_days_is_fractional() {
        let a = parse_timestamp("2023-01-01T00:00:00.000+0000").unwrap();
        let b = parse_timestamp("2023-01-02T12:00:00.000+0000").unwrap();
        assert!((elapsed_days(a, b) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn deserializes_tracker_payload() {
        let issue: Issue = serde_json::from_value(json!({
            "key": "KAFKA-1",
            "fields": {
                "created": "2023-01-01T10:00:00.000+0000",
                "resolutiondate": "2023-01-05T10:00:00.000+0000",
                "status": {"name": "Closed"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "Test User"},
                "reporter": null,
                "timespent": 3600,
                "changelog": {"histories": []}
            }
        }))
        .unwrap();

        assert_eq!(issue.status_name(), Some("Closed"));
        assert_eq!(issue.priority_or_unset(), "High");
        assert_eq!(issue.assignee_or_unassigned(), "Test User");
        assert_eq!(issue.reporter_or_unknown(), UNKNOWN_REPORTER);
        assert_eq!(issue.time_spent_seconds(), Some(3600));
    }

    #[test]
    fn sentinels_apply_to_missing_fields() {
        let issue = IssueBuilder::new("X-1").build();
        assert_eq!(issue.assignee_or_unassigned(), UNASSIGNED);
        assert_eq!(issue.reporter_or_unknown(), UNKNOWN_REPORTER);
        assert_eq!(issue.priority_or_unset(), UNSET_PRIORITY);
        assert_eq!(issue.status_or_unknown(), UNKNOWN_STATUS);
    }

    #[test]
    fn user_without_display_name_uses_sentinel() {
        let issue: Issue =
            serde_json::from_value(json!({"key": "X-1", "fields": {"assignee": {}}})).unwrap();
        assert_eq!(issue.assignee_or_unassigned(), UNASSIGNED);
    }

    #[test]
    fn zero_time_spent_is_absent() {
        let issue = IssueBuilder::new("X-1").time_spent(0).build();
        assert_eq!(issue.time_spent_seconds(), None);
    }

    #[test]
    fn closed_subset_matches_vocabulary_in_order() {
        let issues = vec![
            IssueBuilder::new("A-1").status("Done").build(),
            IssueBuilder::new("A-2").status("In Progress").build(),
            IssueBuilder::new("A-3").build(),
            IssueBuilder::new("A-4").status("Resolved").build(),
        ];
        let closed = ClosedStatuses::default().closed_subset(&issues);
        let keys: Vec<&str> = closed.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["A-1", "A-4"]);
    }
}
