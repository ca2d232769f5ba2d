//! Cassettes for recording and replaying tracker traffic.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::Path;

use crate::error::{JirastatError, Result};
use format::Cassette;

/// Reads and parses a cassette file.
///
/// # Errors
///
/// Returns [`JirastatError::Cassette`] if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        JirastatError::Cassette(format!("failed to read cassette file {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        JirastatError::Cassette(format!("failed to parse cassette file {}: {e}", path.display()))
    })
}
