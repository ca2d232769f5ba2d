//! Binary entrypoint for the `jirastat` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is installed by run() once the flags are parsed.
    // Recording is handled in commands::dispatch via JIRASTAT_RECORD=<file>.
    match jirastat::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
