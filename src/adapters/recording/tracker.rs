//! Recording adapter for the `IssueSearch` port.

use super::{record_result, SharedRecorder};
use crate::ports::tracker::{IssueSearch, SearchFuture, SearchRequest};

/// Records every search request and its page while delegating to an inner
/// implementation.
pub struct RecordingIssueSearch {
    inner: Box<dyn IssueSearch>,
    recorder: SharedRecorder,
}

impl RecordingIssueSearch {
    /// Creates a recording search wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueSearch>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl IssueSearch for RecordingIssueSearch {
    fn search(&self, request: &SearchRequest) -> SearchFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.search(&request).await;
            record_result(&self.recorder, "tracker", "search", &request, &result);
            result
        })
    }
}
