//! Core library entry for the `jirastat` CLI.
//!
//! Issues are pulled page by page from a Jira-compatible search endpoint,
//! cached as JSON, and reduced by six independent aggregations into chart
//! series rendered as PNG files.

pub mod adapters;
pub mod analytics;
pub mod cassette;
pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod issue;
pub mod ports;
pub mod report;
pub mod store;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed. Logging is set up
/// from `--quiet`/`--verbose` before the command runs.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_logging(&cli);
    commands::dispatch(&cli)
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// CLI flags when set. A subscriber installed earlier is kept.
fn init_logging(cli: &cli::Cli) {
    let log_level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let installed = if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
    } else {
        tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(log_level).try_init()
    };
    if installed.is_err() {
        tracing::debug!("Log subscriber already installed");
    }
}
