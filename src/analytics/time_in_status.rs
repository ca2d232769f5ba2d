//! Time in status: days from creation to last update, grouped by status.

use crate::analytics::OrderedGroups;
use crate::issue::{elapsed_days, Issue};

/// Durations for one status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDurations {
    /// Status name as reported by the tracker.
    pub status: String,
    /// Status name made safe for use in a file name.
    pub identifier: String,
    /// Days between creation and last update, one per issue.
    pub days: Vec<f64>,
}

/// Minimum number of values for a status to be reported.
pub const MIN_STATUS_SAMPLES: usize = 2;

/// Groups `issues` by status and measures creation-to-update days.
///
/// Issues missing either timestamp are skipped. Statuses with fewer than
/// [`MIN_STATUS_SAMPLES`] values are dropped. Groups appear in first-seen order.
#[must_use]
pub fn time_in_status(issues: &[Issue]) -> Vec<StatusDurations> {
    let mut groups: OrderedGroups<Vec<f64>> = OrderedGroups::new();
    for issue in issues {
        let (Some(created), Some(updated)) = (issue.created(), issue.updated()) else {
            continue;
        };
        groups.entry(issue.status_or_unknown()).push(elapsed_days(created, updated));
    }

    groups
        .into_entries()
        .into_iter()
        .filter_map(|(status, days)| {
            if days.len() < MIN_STATUS_SAMPLES {
                tracing::debug!(%status, samples = days.len(), "Skipping status with too few issues");
                return None;
            }
            Some(StatusDurations { identifier: sanitize_identifier(&status), status, days })
        })
        .collect()
}

/// Replaces every character that is not alphanumeric, a space, `-` or `_`
/// with `_`, then trims trailing whitespace.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') { c } else { '_' })
        .collect();
    replaced.trim_end().to_string()
}
