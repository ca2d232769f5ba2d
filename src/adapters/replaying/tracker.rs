//! Replaying adapter for the `IssueSearch` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::tracker::{IssueSearch, SearchFuture, SearchRequest};

/// Serves recorded search pages from a cassette, in recorded order.
///
/// Running out of recorded pages is reported as a failed request.
pub struct ReplayingIssueSearch {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueSearch {
    /// Creates a replaying search from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::new(cassette)) }
    }
}

impl IssueSearch for ReplayingIssueSearch {
    fn search(&self, request: &SearchRequest) -> SearchFuture<'_> {
        let output = next_output(&self.replayer, "tracker", "search");
        let start_at = request.start_at;
        Box::pin(async move {
            let output = output?;
            tracing::debug!(start_at, "Replaying recorded page");
            replay_result(output)
        })
    }
}
