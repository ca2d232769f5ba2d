//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `jirastat`.
#[derive(Debug, Parser)]
#[command(name = "jirastat", version, about = "Fetch tracker issues and chart project flow")]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Log debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect every project issue and write the cache.
    Fetch {
        /// Serve tracker pages from a recorded cassette.
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,
    },
    /// Compute the aggregations and render the charts.
    Report {
        /// Use the cached issues instead of fetching.
        #[arg(long, conflicts_with = "replay")]
        from_cache: bool,

        /// Serve tracker pages from a recorded cassette.
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,
    },
    /// Show what the cache holds.
    Status,
}
