//! Issue store: a JSON snapshot of the last fetched issue set per project.
//!
//! Snapshots live at `<data_dir>/issues_<PROJECT>.json` and use the
//! `FileSystem` port for all I/O. Layout:
//!
//! ```text
//! {
//!   "project": "KAFKA",
//!   "lastUpdated": "2024-06-15T10:30:00Z",
//!   "totalIssues": 2,
//!   "issues": [ ... ]
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::{JirastatError, Result};
use crate::issue::Issue;

/// A persisted issue set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedIssues {
    /// Project key the issues were fetched for.
    pub project: String,
    /// When the snapshot was written.
    pub last_updated: DateTime<Utc>,
    /// Number of issues in the snapshot.
    pub total_issues: usize,
    /// The issues, in fetch order.
    pub issues: Vec<Issue>,
}

/// Persistence layer for fetched issue sets.
///
/// All I/O goes through `ctx.fs` and timestamps come from `ctx.clock`.
pub struct IssueStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> IssueStore<'a> {
    /// Creates a store rooted at the given data directory.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Writes `issues` as the snapshot for `project`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, project: &str, issues: &[Issue]) -> Result<PathBuf> {
        let snapshot = CachedIssues {
            project: project.to_string(),
            last_updated: self.ctx.clock.now(),
            total_issues: issues.len(),
            issues: issues.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        let path = self.snapshot_path(project);
        self.ctx.fs.write(&path, &json).map_err(|e| {
            JirastatError::Store(format!("failed to write {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), issues = issues.len(), "Saved issue snapshot");
        Ok(path)
    }

    /// Loads the snapshot for `project`. Returns `Ok(None)` if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, project: &str) -> Result<Option<CachedIssues>> {
        let path = self.snapshot_path(project);
        if !self.ctx.fs.exists(&path) {
            tracing::warn!(path = %path.display(), "No issue snapshot found");
            return Ok(None);
        }
        let content = self.ctx.fs.read_to_string(&path).map_err(|e| {
            JirastatError::Store(format!("failed to read {}: {e}", path.display()))
        })?;
        let snapshot: CachedIssues = serde_json::from_str(&content).map_err(|e| {
            JirastatError::Store(format!("failed to parse {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), issues = snapshot.total_issues, "Loaded issue snapshot");
        Ok(Some(snapshot))
    }

    /// Path of the snapshot file for `project`.
    #[must_use]
    pub fn snapshot_path(&self, project: &str) -> PathBuf {
        self.root.join(format!("issues_{project}.json"))
    }
}
