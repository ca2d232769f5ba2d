//! `jirastat report` command.

use crate::analytics::Aggregations;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::issue::Issue;
use crate::report::{plan_charts, render_all, ReportSummary};
use crate::store::IssueStore;

/// Execute the `report` command.
///
/// Issues come from the tracker, or from the cache with `from_cache`. A
/// fresh collection is cached before the charts are rendered, unless the
/// run failed before retrieving anything. Each chart
/// is independent: transforms with no data are skipped and failed renders
/// are listed in the returned summary.
///
/// # Errors
///
/// Returns an error string if the cache is requested but missing or
/// unreadable, or if a fresh collection cannot be cached.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    from_cache: bool,
) -> Result<ReportSummary, String> {
    let issues = load_issues(ctx, config, from_cache)?;
    let closed = config.closed_statuses();

    let aggregations = Aggregations::compute(&issues, &closed);
    let planned = plan_charts(&aggregations, &config.project_key);
    let summary = render_all(ctx.renderer.as_ref(), &planned);

    println!(
        "Report for {}: {} issue(s), {} closed",
        config.project_key,
        issues.len(),
        closed.closed_subset(&issues).len()
    );
    println!("Wrote {} chart(s) to {}", summary.written.len(), config.output_dir.display());
    for path in &summary.written {
        println!("  {}", path.display());
    }
    if !summary.skipped.is_empty() {
        println!("Skipped (no data): {}", summary.skipped.join(", "));
    }
    for (chart, err) in &summary.failed {
        println!("Failed to render {chart}: {err}");
    }
    Ok(summary)
}

fn load_issues(
    ctx: &ServiceContext,
    config: &Config,
    from_cache: bool,
) -> Result<Vec<Issue>, String> {
    let store = IssueStore::new(ctx, &config.data_dir);
    if from_cache {
        return match store.load(&config.project_key).map_err(|e| e.to_string())? {
            Some(cached) => Ok(cached.issues),
            None => Err(format!(
                "No cached issues for {}; run `jirastat fetch` first",
                config.project_key
            )),
        };
    }

    let collection = super::collect_project(ctx, config)?;
    super::cache_collection(ctx, config, &collection)?;
    Ok(collection.issues)
}
