//! Paginated issue collection.
//!
//! The collector drives [`IssueSearch`] one page at a time until the
//! server's reported total is reached. A failed page ends the run early:
//! whatever was gathered is returned, tagged as partial, and the failure is
//! logged rather than propagated.

use crate::issue::Issue;
use crate::ports::tracker::{IssueSearch, SearchRequest};

/// How a collection run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every issue the server reported was retrieved.
    Complete,
    /// A page request failed or came back empty before the reported total;
    /// issues before `offset` were retrieved.
    Partial {
        /// Offset of the page that failed.
        offset: usize,
        /// Failure message.
        reason: String,
    },
}

/// The issues gathered by one run, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Accumulated issues.
    pub issues: Vec<Issue>,
    /// Number of successful page requests.
    pub pages: usize,
    /// Whether the run finished or aborted.
    pub outcome: Outcome,
}

impl Collection {
    /// Returns `true` if the run was cut short by a failed request.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.outcome, Outcome::Partial { .. })
    }
}

/// Assembles complete result sets from a paged search port.
pub struct IssueCollector<'a> {
    search: &'a dyn IssueSearch,
    page_size: usize,
}

impl<'a> IssueCollector<'a> {
    /// Creates a collector requesting at most `page_size` issues per page.
    #[must_use]
    pub fn new(search: &'a dyn IssueSearch, page_size: usize) -> Self {
        Self { search, page_size: page_size.max(1) }
    }

    /// Collects every issue matching `jql`.
    ///
    /// The offset advances by the number of issues actually returned, so a
    /// server that caps pages below `page_size` is still walked fully. The
    /// loop stops once `offset + returned >= total`. A page that comes back
    /// empty before the total is reached ends the run as partial, since the
    /// offset could not advance.
    pub async fn collect(&self, jql: &str) -> Collection {
        let mut issues = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            let request = SearchRequest::new(jql, offset, self.page_size);
            let page = match self.search.search(&request).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(offset, "Failed to fetch issues: {e}");
                    return Collection {
                        issues,
                        pages,
                        outcome: Outcome::Partial { offset, reason: e.to_string() },
                    };
                }
            };
            pages += 1;

            let returned = page.issues.len();
            issues.extend(page.issues);
            tracing::info!(returned, collected = issues.len(), total = page.total, "Fetched page");

            if offset + returned >= page.total {
                break;
            }
            if returned == 0 {
                tracing::warn!(offset, total = page.total, "Server returned an empty page early");
                return Collection {
                    issues,
                    pages,
                    outcome: Outcome::Partial {
                        offset,
                        reason: "server returned an empty page before the reported total".into(),
                    },
                };
            }
            offset += returned;
        }

        Collection { issues, pages, outcome: Outcome::Complete }
    }
}
