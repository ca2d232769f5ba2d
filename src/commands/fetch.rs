//! `jirastat fetch` command.

use crate::collector::{Collection, Outcome};
use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `fetch` command.
///
/// Collects every issue in the project and replaces the cached snapshot
/// with whatever was retrieved. A run that stopped before retrieving
/// anything leaves the previous snapshot in place.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the cache cannot
/// be written.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let collection = super::collect_project(ctx, config)?;
    let summary = summary_line(&config.project_key, &collection);
    match super::cache_collection(ctx, config, &collection)? {
        Some(path) => println!("{summary} -> {}", path.display()),
        None => println!("{summary}; cache left unchanged"),
    }
    Ok(())
}

fn summary_line(project: &str, collection: &Collection) -> String {
    let state = match &collection.outcome {
        Outcome::Complete => "complete".to_string(),
        Outcome::Partial { offset, .. } => format!("partial, stopped at offset {offset}"),
    };
    format!(
        "Fetched {} issue(s) for {project} in {} page(s) ({state})",
        collection.issues.len(),
        collection.pages
    )
}
