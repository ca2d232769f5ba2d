//! Closed issues per priority.

use crate::analytics::OrderedGroups;
use crate::issue::Issue;

/// Number of closed issues with one priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCount {
    /// Priority name, or a sentinel.
    pub priority: String,
    /// Number of issues.
    pub count: u64,
}

/// Counts closed issues per priority, highest count first. Equal counts
/// keep first-seen order.
#[must_use]
pub fn priority_distribution(closed: &[&Issue]) -> Vec<PriorityCount> {
    let mut counts: OrderedGroups<u64> = OrderedGroups::new();
    for issue in closed {
        *counts.entry(issue.priority_or_unset()) += 1;
    }

    let mut ranked: Vec<PriorityCount> = counts
        .into_entries()
        .into_iter()
        .map(|(priority, count)| PriorityCount { priority, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::test_support::IssueBuilder;
    use crate::issue::UNSET_PRIORITY;

    fn closed(priorities: &[Option<&str>]) -> Vec<Issue> {
        priorities
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let builder = IssueBuilder::new(&format!("K-{i}")).status("Closed");
                match p {
                    Some(name) => builder.priority(name).build(),
                    None => builder.build(),
                }
            })
            .collect()
    }

    #[test]
    fn sorts_by_count_descending() {
        let issues = closed(&[Some("Low"), Some("High"), Some("High"), Some("Major"), Some("High")]);
        let refs: Vec<&Issue> = issues.iter().collect();
        let result = priority_distribution(&refs);
        assert_eq!(result[0], PriorityCount { priority: "High".into(), count: 3 });
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let issues = closed(&[Some("Minor"), Some("Blocker"), Some("Trivial"), Some("Blocker")]);
        let refs: Vec<&Issue> = issues.iter().collect();
        let names: Vec<String> =
            priority_distribution(&refs).into_iter().map(|p| p.priority).collect();
        assert_eq!(names, vec!["Blocker", "Minor", "Trivial"]);
    }

    #[test]
    fn missing_priority_counts_as_unset() {
        let issues = closed(&[None, None, Some("High")]);
        let refs: Vec<&Issue> = issues.iter().collect();
        let result = priority_distribution(&refs);
        assert_eq!(result[0], PriorityCount { priority: UNSET_PRIORITY.into(), count: 2 });
    }
}
