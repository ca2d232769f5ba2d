//! Top users by assignee and reporter credits.

use crate::analytics::OrderedGroups;
use crate::issue::Issue;

/// Maximum number of users reported.
pub const TOP_USERS_LIMIT: usize = 30;

/// Credits for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTally {
    /// Display name, or a sentinel.
    pub user: String,
    /// Closed issues assigned to the user.
    pub assignee: u64,
    /// Closed issues reported by the user.
    pub reporter: u64,
}

impl UserTally {
    /// Assignee plus reporter credits.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.assignee + self.reporter
    }
}

#[derive(Default)]
struct Credits {
    assignee: u64,
    reporter: u64,
}

/// Ranks users by total credits on closed issues.
///
/// Each issue gives one assignee credit and one reporter credit; a user who
/// is both is credited twice. Users with equal totals keep the order in
/// which they were first seen. At most [`TOP_USERS_LIMIT`] users are returned.
#[must_use]
pub fn top_users(closed: &[&Issue]) -> Vec<UserTally> {
    let mut credits: OrderedGroups<Credits> = OrderedGroups::new();
    for issue in closed {
        credits.entry(issue.assignee_or_unassigned()).assignee += 1;
        credits.entry(issue.reporter_or_unknown()).reporter += 1;
    }

    let mut ranked: Vec<UserTally> = credits
        .into_entries()
        .into_iter()
        .map(|(user, c)| UserTally { user, assignee: c.assignee, reporter: c.reporter })
        .collect();
    // sort_by is stable, which keeps first-seen order among ties.
    ranked.sort_by(|a, b| b.total().cmp(&a.total()));
    ranked.truncate(TOP_USERS_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::test_support::IssueBuilder;
    use crate::issue::{UNASSIGNED, UNKNOWN_REPORTER};

    fn issue(assignee: Option<&str>, reporter: Option<&str>) -> Issue {
        let mut builder = IssueBuilder::new("K-1").status("Done");
        if let Some(a) = assignee {
            builder = builder.assignee(a);
        }
        if let Some(r) = reporter {
            builder = builder.reporter(r);
        }
        builder.build()
    }

    #[test]
    fn credits_both_roles() {
        let issues = vec![issue(Some("alice"), Some("bob")), issue(Some("alice"), Some("alice"))];
        let refs: Vec<&Issue> = issues.iter().collect();
        let ranked = top_users(&refs);

        assert_eq!(ranked[0], UserTally { user: "alice".into(), assignee: 2, reporter: 1 });
        assert_eq!(ranked[1], UserTally { user: "bob".into(), assignee: 0, reporter: 1 });
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let issues = vec![issue(Some("carol"), Some("dave")), issue(Some("erin"), Some("frank"))];
        let refs: Vec<&Issue> = issues.iter().collect();
        let names: Vec<String> = top_users(&refs).into_iter().map(|u| u.user).collect();
        assert_eq!(names, vec!["carol", "dave", "erin", "frank"]);
    }

    #[test]
    fn higher_totals_move_ahead_of_earlier_users() {
        let issues = vec![
            issue(Some("carol"), Some("dave")),
            issue(Some("erin"), Some("erin")),
        ];
        let refs: Vec<&Issue> = issues.iter().collect();
        let names: Vec<String> = top_users(&refs).into_iter().map(|u| u.user).collect();
        assert_eq!(names, vec!["erin", "carol", "dave"]);
    }

    #[test]
    fn missing_people_use_sentinels() {
        let issues = vec![issue(None, None)];
        let refs: Vec<&Issue> = issues.iter().collect();
        let ranked = top_users(&refs);
        assert_eq!(ranked[0].user, UNASSIGNED);
        assert_eq!(ranked[0].assignee, 1);
        assert_eq!(ranked[1].user, UNKNOWN_REPORTER);
        assert_eq!(ranked[1].reporter, 1);
    }

    #[test]
    fn truncates_to_limit() {
        let issues: Vec<Issue> = (0..1000)
            .map(|i| issue(Some(&format!("user-{i}")), Some(&format!("reporter-{i}"))))
            .collect();
        let refs: Vec<&Issue> = issues.iter().collect();
        let ranked = top_users(&refs);
        assert_eq!(ranked.len(), TOP_USERS_LIMIT);
        assert_eq!(ranked[0].user, "user-0");
        assert_eq!(ranked[1].user, "reporter-0");
    }

    #[test]
    fn empty_input_ranks_nobody() {
        assert!(top_users(&[]).is_empty());
    }
}
