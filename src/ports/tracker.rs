//! Issue search port for paged tracker queries.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Fields requested for every issue.
pub const SEARCH_FIELDS: &str =
    "key,created,updated,status,resolutiondate,assignee,reporter,timespent,priority,changelog";

/// Boxed future type alias used by [`IssueSearch`] to keep the trait dyn-compatible.
pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SearchPage, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// One paged query against the tracker's search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query expression, e.g. `project = KAFKA`.
    pub jql: String,
    /// Zero-based index of the first issue to return.
    pub start_at: usize,
    /// Upper bound on the number of issues in the page.
    pub max_results: usize,
    /// Comma-separated field list.
    pub fields: String,
}

impl SearchRequest {
    /// Builds a request for the standard field list.
    #[must_use]
    pub fn new(jql: &str, start_at: usize, max_results: usize) -> Self {
        Self { jql: jql.to_string(), start_at, max_results, fields: SEARCH_FIELDS.to_string() }
    }
}

/// A batch of issues plus the server's total match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Issues in this page, in server order.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Total number of issues matching the query.
    pub total: usize,
}

/// Runs paged searches against an issue tracker.
pub trait IssueSearch: Send + Sync {
    /// Fetches one page of results.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, a non-success status,
    /// or a payload that cannot be parsed.
    fn search(&self, request: &SearchRequest) -> SearchFuture<'_>;
}
