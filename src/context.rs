//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveIssueSearch, PngChartRenderer};
use crate::adapters::recording::{RecordingIssueSearch, SharedRecorder};
use crate::adapters::replaying::ReplayingIssueSearch;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::{JirastatError, Result};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::renderer::{Chart, ChartRenderer};
use crate::ports::tracker::{IssueSearch, SearchFuture, SearchRequest};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different tracker implementations (live, recording, replaying);
/// the clock, filesystem and renderer are always live.
pub struct ServiceContext {
    /// Clock for stamping snapshots.
    pub clock: Box<dyn Clock>,
    /// Filesystem for the issue cache.
    pub fs: Box<dyn FileSystem>,
    /// Tracker search endpoint.
    pub tracker: Box<dyn IssueSearch>,
    /// Chart output.
    pub renderer: Box<dyn ChartRenderer>,
    /// Recorder shared with a recording tracker, flushed by [`ServiceContext::finish`].
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a context that talks to the configured tracker.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Transport`] if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self> {
        Ok(Self::with_tracker(config, Box::new(live_search(config)?)))
    }

    /// Creates a live context that records every tracker exchange to `path`.
    ///
    /// The cassette is written by [`ServiceContext::finish`].
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Transport`] if the HTTP client cannot be built.
    pub fn recording(config: &Config, path: &Path) -> Result<Self> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{}-search", config.project_key),
            config.jira_server.clone(),
        )));
        let tracker =
            RecordingIssueSearch::new(Box::new(live_search(config)?), Arc::clone(&recorder));
        let mut ctx = Self::with_tracker(config, Box::new(tracker));
        ctx.recorder = Some(recorder);
        Ok(ctx)
    }

    /// Creates a context whose tracker replays the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Cassette`] if the cassette cannot be read or parsed.
    pub fn replaying(config: &Config, path: &Path) -> Result<Self> {
        let cassette = crate::cassette::load(path)?;
        tracing::info!(
            cassette = %path.display(),
            interactions = cassette.interactions.len(),
            "Replaying tracker traffic"
        );
        Ok(Self::with_tracker(config, Box::new(ReplayingIssueSearch::new(&cassette))))
    }

    /// Creates a context with live clock and filesystem whose tracker and
    /// renderer fail every call. Tests replace the ports they need.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            tracker: Box::new(UnconfiguredTracker),
            renderer: Box::new(UnconfiguredRenderer),
            recorder: None,
        }
    }

    /// Writes the cassette if this context is recording. Returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Cassette`] if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        let Some(recorder) = self.recorder else {
            return Ok(None);
        };
        // The recording tracker holds the other reference.
        drop(self.tracker);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| JirastatError::Cassette("recorder is still shared".into()))?
            .into_inner()
            .map_err(|_| JirastatError::Cassette("recorder lock poisoned".into()))?;
        let path = recorder
            .finish()
            .map_err(|e| JirastatError::Cassette(format!("failed to write cassette: {e}")))?;
        Ok(Some(path))
    }

    fn with_tracker(config: &Config, tracker: Box<dyn IssueSearch>) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            tracker,
            renderer: Box::new(PngChartRenderer::new(&config.output_dir)),
            recorder: None,
        }
    }
}

fn live_search(config: &Config) -> Result<LiveIssueSearch> {
    LiveIssueSearch::new(
        &config.jira_server,
        Duration::from_secs(config.timeout_secs),
        config.api_token.clone(),
    )
    .map_err(|e| JirastatError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Tracker stand-in that rejects every request.
struct UnconfiguredTracker;

impl IssueSearch for UnconfiguredTracker {
    fn search(&self, _request: &SearchRequest) -> SearchFuture<'_> {
        Box::pin(async { Err("no tracker configured for this context".into()) })
    }
}

/// Renderer stand-in that rejects every chart.
struct UnconfiguredRenderer;

impl ChartRenderer for UnconfiguredRenderer {
    fn render(
        &self,
        chart: &Chart,
    ) -> std::result::Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("no renderer configured for chart {}", chart.file_stem).into())
    }
}
