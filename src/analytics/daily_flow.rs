//! Daily flow: issues created and resolved per calendar day.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::issue::Issue;

/// Counts for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyFlow {
    /// The day.
    pub date: NaiveDate,
    /// Issues created that day.
    pub created: u64,
    /// Issues resolved that day.
    pub resolved: u64,
    /// Issues created up to and including that day.
    pub cumulative_created: u64,
    /// Issues resolved up to and including that day.
    pub cumulative_resolved: u64,
}

/// Builds one entry per day from the earliest to the latest creation or
/// resolution date, zero-filling days without activity.
///
/// Days are taken in each timestamp's own offset. Returns `None` when no
/// issue carries either date.
#[must_use]
pub fn daily_flow(issues: &[Issue]) -> Option<Vec<DailyFlow>> {
    let mut created: HashMap<NaiveDate, u64> = HashMap::new();
    let mut resolved: HashMap<NaiveDate, u64> = HashMap::new();
    let mut range: Option<(NaiveDate, NaiveDate)> = None;

    let mut note = |day: NaiveDate| {
        range = Some(match range {
            Some((first, last)) => (first.min(day), last.max(day)),
            None => (day, day),
        });
    };

    for issue in issues {
        if let Some(ts) = issue.created() {
            let day = ts.date_naive();
            *created.entry(day).or_default() += 1;
            note(day);
        }
        if let Some(ts) = issue.resolved() {
            let day = ts.date_naive();
            *resolved.entry(day).or_default() += 1;
            note(day);
        }
    }

    let Some((first, last)) = range else {
        tracing::debug!("No dated issues; skipping daily flow");
        return None;
    };

    let mut cumulative_created = 0;
    let mut cumulative_resolved = 0;
    let days = first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| {
            let created = created.get(&date).copied().unwrap_or(0);
            let resolved = resolved.get(&date).copied().unwrap_or(0);
            cumulative_created += created;
            cumulative_resolved += resolved;
            DailyFlow { date, created, resolved, cumulative_created, cumulative_resolved }
        })
        .collect();
    Some(days)
}
