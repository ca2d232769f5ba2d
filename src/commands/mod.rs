//! Command dispatch and handlers.

pub mod fetch;
pub mod report;
pub mod status;

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::collector::{Collection, IssueCollector, Outcome};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::store::IssueStore;

/// Dispatch a parsed command to its handler.
///
/// The configuration is loaded and validated before anything else runs.
/// When `JIRASTAT_RECORD` is set to a file path, every tracker request is
/// recorded to a cassette at that path. `--replay` takes precedence.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = Config::load(&cli.config).map_err(|e| e.to_string())?;

    let replay = match &cli.command {
        Command::Fetch { replay } | Command::Report { replay, .. } => replay.as_deref(),
        Command::Status => None,
    };
    let ctx = open_context(&config, replay)?;

    let result = match &cli.command {
        Command::Fetch { .. } => fetch::run(&ctx, &config),
        Command::Report { from_cache, .. } => report::run(&ctx, &config, *from_cache).map(drop),
        Command::Status => status::run(&ctx, &config),
    };

    finish_context(ctx, result)
}

/// Finishes recording after the command completes, even on error.
///
/// A cassette that cannot be written is logged; the command's own error
/// takes precedence over it.
fn finish_context(ctx: ServiceContext, result: Result<(), String>) -> Result<(), String> {
    match ctx.finish() {
        Ok(Some(path)) => eprintln!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to write cassette: {e}");
            result?;
            return Err(e.to_string());
        }
    }
    result
}

fn open_context(config: &Config, replay: Option<&Path>) -> Result<ServiceContext, String> {
    let ctx = if let Some(path) = replay {
        ServiceContext::replaying(config, path)
    } else if let Ok(path) = env::var("JIRASTAT_RECORD") {
        ServiceContext::recording(config, Path::new(&path))
    } else {
        ServiceContext::live(config)
    };
    ctx.map_err(|e| e.to_string())
}

/// Collects every issue in the configured project.
///
/// A partial collection is logged and returned; it is not an error.
///
/// # Errors
///
/// Returns an error string if the async runtime cannot be started.
pub fn collect_project(ctx: &ServiceContext, config: &Config) -> Result<Collection, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let query = config.project_query();
    tracing::info!(query = %query, page_size = config.max_results, "Collecting issues");
    let collector = IssueCollector::new(ctx.tracker.as_ref(), config.max_results);
    let collection = runtime.block_on(collector.collect(&query));

    if let Outcome::Partial { offset, reason } = &collection.outcome {
        tracing::warn!(
            offset,
            collected = collection.issues.len(),
            "Collection stopped early: {reason}"
        );
    }
    Ok(collection)
}

/// Writes `collection` as the project's cached snapshot.
///
/// A partial collection that retrieved nothing leaves the existing cache in
/// place and returns `Ok(None)`. A partial collection with issues replaces
/// the cache, since it is the freshest data available.
///
/// # Errors
///
/// Returns an error string if the cache cannot be written.
pub fn cache_collection(
    ctx: &ServiceContext,
    config: &Config,
    collection: &Collection,
) -> Result<Option<PathBuf>, String> {
    if collection.is_partial() && collection.issues.is_empty() {
        tracing::warn!(project = %config.project_key, "Nothing was fetched; cache left unchanged");
        return Ok(None);
    }
    IssueStore::new(ctx, &config.data_dir)
        .save(&config.project_key, &collection.issues)
        .map(Some)
        .map_err(|e| e.to_string())
}
