//! Live adapter for the `IssueSearch` port using the tracker's REST API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::issue::Issue;
use crate::ports::tracker::{IssueSearch, SearchFuture, SearchPage, SearchRequest};

/// Path of the search endpoint relative to the server address.
const SEARCH_PATH: &str = "/rest/api/2/search";

/// Searches a tracker over HTTP.
pub struct LiveIssueSearch {
    client: Client,
    search_url: String,
    api_token: Option<String>,
}

impl LiveIssueSearch {
    /// Creates a client for `server` applying `timeout` to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        server: &str,
        timeout: Duration,
        api_token: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, search_url: search_url(server), api_token })
    }
}

fn search_url(server: &str) -> String {
    format!("{}{SEARCH_PATH}", server.trim_end_matches('/'))
}

/// Search response body. Extra keys (`startAt`, `maxResults`, ...) are ignored.
#[derive(Deserialize)]
struct SearchResponse {
    total: usize,
    issues: Vec<Issue>,
}

/// Error body returned by the tracker on failure.
#[derive(Deserialize)]
struct TrackerError {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
}

impl IssueSearch for LiveIssueSearch {
    fn search(&self, request: &SearchRequest) -> SearchFuture<'_> {
        let query = [
            ("jql", request.jql.clone()),
            ("startAt", request.start_at.to_string()),
            ("maxResults", request.max_results.to_string()),
            ("fields", request.fields.clone()),
            ("expand", "changelog".to_string()),
        ];

        Box::pin(async move {
            let mut builder = self.client.get(&self.search_url).query(&query);
            if let Some(token) = &self.api_token {
                builder = builder.bearer_auth(token);
            }

            tracing::debug!(url = %self.search_url, start_at = %query[1].1, "Requesting page");
            let response = builder.send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Tracker request failed: {e}").into()
                },
            )?;

            let status = response.status();
            let body = response.text().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read tracker response: {e}").into()
                },
            )?;

            if !status.is_success() {
                let msg = serde_json::from_str::<TrackerError>(&body)
                    .ok()
                    .filter(|e| !e.error_messages.is_empty())
                    .map_or(body, |e| e.error_messages.join("; "));
                return Err(format!("Tracker error ({}): {msg}", status.as_u16()).into());
            }

            let parsed: SearchResponse = serde_json::from_str(&body).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse tracker response: {e}").into()
                },
            )?;

            Ok(SearchPage { issues: parsed.issues, total: parsed.total })
        })
    }
}
