//! Aggregations over a fetched issue set.
//!
//! Each transform is a pure function over an immutable snapshot: the full
//! issue set or its closed subset. Transforms do not depend on each other.
//! Missing fields are resolved at read time (see [`crate::issue`]), so
//! every transform is total; "no data" is reported as `None` or an empty
//! result rather than an error.

pub mod daily_flow;
pub mod lead_time;
pub mod priority;
pub mod time_in_status;
pub mod top_users;
pub mod worklog;

use std::collections::HashMap;

use crate::issue::{ClosedStatuses, Issue};

pub use daily_flow::{daily_flow, DailyFlow};
pub use lead_time::lead_times;
pub use priority::{priority_distribution, PriorityCount};
pub use time_in_status::{sanitize_identifier, time_in_status, StatusDurations};
pub use top_users::{top_users, UserTally, TOP_USERS_LIMIT};
pub use worklog::{worklog_hours, WorklogHours};

/// The outputs of all six transforms for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregations {
    /// Days from creation to resolution, closed issues only.
    pub lead_time: Option<Vec<f64>>,
    /// Days from creation to last update, per status with at least two values.
    pub time_in_status: Vec<StatusDurations>,
    /// Created/resolved counts per calendar day with running totals.
    pub daily_flow: Option<Vec<DailyFlow>>,
    /// Users ranked by assignee plus reporter credits on closed issues.
    pub top_users: Vec<UserTally>,
    /// Logged hours on closed issues.
    pub worklog: Option<WorklogHours>,
    /// Closed issues per priority, highest count first.
    pub priorities: Vec<PriorityCount>,
}

impl Aggregations {
    /// Runs every transform over `issues`.
    #[must_use]
    pub fn compute(issues: &[Issue], closed_statuses: &ClosedStatuses) -> Self {
        let closed = closed_statuses.closed_subset(issues);
        tracing::debug!(all = issues.len(), closed = closed.len(), "Computing aggregations");

        Self {
            lead_time: lead_times(&closed),
            time_in_status: time_in_status(issues),
            daily_flow: daily_flow(issues),
            top_users: top_users(&closed),
            worklog: worklog_hours(&closed),
            priorities: priority_distribution(&closed),
        }
    }
}

/// Groups keyed by string, iterated in first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> OrderedGroups<V> {
    pub(crate) fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    /// Returns the value for `key`, inserting a default at the end if new.
    pub(crate) fn entry(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}
