//! Report configuration.
//!
//! Loaded from a JSON file, then overridden by `JIRASTAT_*` environment
//! variables (a `.env` file in the working directory is honored). Loading
//! fails fast: nothing touches the network until the configuration is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{JirastatError, Result};
use crate::issue::{ClosedStatuses, DEFAULT_CLOSED_STATUSES};

/// Page size used when `max_results` is not configured.
pub const DEFAULT_MAX_RESULTS: usize = 1000;
/// Per-request timeout used when `timeout_secs` is not configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one project report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Tracker base address, e.g. `https://issues.apache.org/jira`.
    pub jira_server: String,
    /// Project key used in queries and cache file names.
    pub project_key: String,
    /// Page size for search requests.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Statuses that count as closed.
    #[serde(default = "default_closed_statuses")]
    pub closed_statuses: Vec<String>,
    /// Directory for rendered charts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory for the issue cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_closed_statuses() -> Vec<String> {
    DEFAULT_CLOSED_STATUSES.iter().map(ToString::to_string).collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Loads configuration from `path`, applying `.env` and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Config`] if the file cannot be read or parsed,
    /// an override is malformed, or the result fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();

        let content = std::fs::read_to_string(path).map_err(|e| {
            JirastatError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_json(&content)
            .map_err(|e| JirastatError::Config(format!("{}: {e}", path.display())))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        tracing::info!(project = %config.project_key, "Configuration loaded");
        Ok(config)
    }

    /// Parses configuration JSON without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a required key is missing.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Applies `JIRASTAT_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Config`] if `JIRASTAT_MAX_RESULTS` is not a number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup("JIRASTAT_SERVER") {
            self.jira_server = server;
        }
        if let Some(project) = lookup("JIRASTAT_PROJECT") {
            self.project_key = project;
        }
        if let Some(raw) = lookup("JIRASTAT_MAX_RESULTS") {
            self.max_results = raw.trim().parse().map_err(|_| {
                JirastatError::Config(format!("JIRASTAT_MAX_RESULTS is not a number: {raw:?}"))
            })?;
        }
        if let Some(token) = lookup("JIRASTAT_TOKEN") {
            self.api_token = Some(token);
        }
        Ok(())
    }

    /// Checks invariants and normalizes the server address.
    ///
    /// # Errors
    ///
    /// Returns [`JirastatError::Config`] describing the first violated rule.
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.jira_server.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(JirastatError::Config("jira_server is empty".into()));
        }
        self.jira_server = trimmed;

        if self.project_key.trim().is_empty() {
            return Err(JirastatError::Config("project_key is empty".into()));
        }
        if self.max_results == 0 {
            return Err(JirastatError::Config("max_results must be at least 1".into()));
        }
        if self.closed_statuses.is_empty() {
            return Err(JirastatError::Config("closed_statuses is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(JirastatError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Query selecting every issue in the project.
    #[must_use]
    pub fn project_query(&self) -> String {
        format!("project = {}", self.project_key)
    }

    /// Terminal-status vocabulary.
    #[must_use]
    pub fn closed_statuses(&self) -> ClosedStatuses {
        ClosedStatuses::new(self.closed_statuses.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const MINIMAL: &str = r#"{"jira_server": "https://issues.apache.org/jira", "project_key": "KAFKA"}"#;

    #[test]
    fn defaults_fill_optional_keys() {
        let config = Config::from_json(MINIMAL).unwrap();
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.closed_statuses, vec!["Closed", "Resolved", "Done"]);
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = Config::from_json(
            r#"{"jira_server": "https://issues.apache.org/jira", "project_key": "KAFKA", "max_results": 50}"#,
        )
        .unwrap();
        assert_eq!(config.project_key, "KAFKA");
        assert_eq!(config.jira_server, "https://issues.apache.org/jira");
        assert_eq!(config.max_results, 50);
    }

    #[test]
    fn missing_project_key_is_rejected() {
        assert!(Config::from_json(r#"{"jira_server": "https://x"}"#).is_err());
    }

    #[test]
    fn validate_strips_trailing_slash() {
        let mut config =
            Config::from_json(r#"{"jira_server": "https://x/jira/", "project_key": "K"}"#).unwrap();
        config.validate().unwrap();
        assert_eq!(config.jira_server, "https://x/jira");
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::from_json(MINIMAL).unwrap();
        config.max_results = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn validate_rejects_empty_vocabulary() {
        let mut config = Config::from_json(MINIMAL).unwrap();
        config.closed_statuses.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("JIRASTAT_PROJECT", "ZOOKEEPER"),
            ("JIRASTAT_MAX_RESULTS", "25"),
            ("JIRASTAT_TOKEN", "secret"),
        ]);
        let mut config = Config::from_json(MINIMAL).unwrap();
        config.apply_overrides(|k| env.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(config.project_key, "ZOOKEEPER");
        assert_eq!(config.max_results, 25);
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.jira_server, "https://issues.apache.org/jira");
    }

    #[test]
    fn malformed_override_is_a_config_error() {
        let mut config = Config::from_json(MINIMAL).unwrap();
        let err = config
            .apply_overrides(|k| (k == "JIRASTAT_MAX_RESULTS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, JirastatError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.project_query(), format!("project = {}", config.project_key));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
