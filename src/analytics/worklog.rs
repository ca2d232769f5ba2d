//! Logged work hours on closed issues.

use crate::analytics::OrderedGroups;
use crate::issue::Issue;

/// Logged hours grouped by assignee, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorklogHours {
    /// Per-assignee hour values, one per issue.
    pub by_user: Vec<(String, Vec<f64>)>,
}

impl WorklogHours {
    /// Every hour value across all users, grouped by user in first-seen order.
    #[must_use]
    pub fn pooled(&self) -> Vec<f64> {
        self.by_user.iter().flat_map(|(_, hours)| hours.iter().copied()).collect()
    }
}

/// Converts positive time-spent values to hours and groups them by assignee.
///
/// Returns `None` when no closed issue has logged work.
#[must_use]
pub fn worklog_hours(closed: &[&Issue]) -> Option<WorklogHours> {
    let mut groups: OrderedGroups<Vec<f64>> = OrderedGroups::new();
    for issue in closed {
        if let Some(secs) = issue.time_spent_seconds() {
            #[allow(clippy::cast_precision_loss)]
            groups.entry(issue.assignee_or_unassigned()).push(secs as f64 / 3600.0);
        }
    }

    let by_user = groups.into_entries();
    if by_user.is_empty() {
        tracing::warn!("No worklog data on closed issues");
        return None;
    }
    Some(WorklogHours { by_user })
}
