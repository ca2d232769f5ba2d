//! `jirastat status` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::store::{CachedIssues, IssueStore};

/// Execute the `status` command.
///
/// Prints what the cache holds for the configured project.
///
/// # Errors
///
/// Returns an error string if the cache exists but cannot be read.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let store = IssueStore::new(ctx, &config.data_dir);
    match store.load(&config.project_key).map_err(|e| e.to_string())? {
        Some(cached) => print!("{}", describe(&cached, config)),
        None => println!("No cached issues for {}.", config.project_key),
    }
    Ok(())
}

fn describe(cached: &CachedIssues, config: &Config) -> String {
    let closed = config.closed_statuses().closed_subset(&cached.issues).len();
    let rows = [
        ("Project", cached.project.clone()),
        ("Updated", cached.last_updated.to_rfc3339()),
        ("Issues", cached.total_issues.to_string()),
        ("Closed", closed.to_string()),
    ];
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter().map(|(label, value)| format!("{label:<width$}  {value}\n")).collect()
}
