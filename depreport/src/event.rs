use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// The slice of the GitHub Actions runner environment this tool consumes.
#[derive(Debug, Clone)]
pub struct ActionEnv {
    pub event_name: Option<String>,
    pub repository: Option<String>,
    pub token: Option<String>,
    pub sha: Option<String>,
    pub event_path: Option<PathBuf>,
    /// `GITHUB_OUTPUT`: file that collects step outputs.
    pub output_path: Option<PathBuf>,
    /// `GITHUB_STEP_SUMMARY`: markdown shown on the workflow run page.
    pub summary_path: Option<PathBuf>,
    pub api_url: String,
}

impl Default for ActionEnv {
    fn default() -> Self {
        Self {
            event_name: None,
            repository: None,
            token: None,
            sha: None,
            event_path: None,
            output_path: None,
            summary_path: None,
            api_url: GITHUB_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(ConfigError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestRef>,
    number: Option<u64>,
}

#[derive(Deserialize)]
struct PullRequestRef {
    number: u64,
}

/// Read the pull request number from the webhook payload the runner saved to
/// `GITHUB_EVENT_PATH`.
pub fn pull_request_number(path: &Path) -> Result<u64, ConfigError> {
    let payload_error = |reason: String| ConfigError::EventPayload {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| payload_error(e.to_string()))?;
    let payload: EventPayload = serde_json::from_str(&content).map_err(|e| payload_error(e.to_string()))?;

    payload
        .pull_request
        .map(|pr| pr.number)
        .or(payload.number)
        .ok_or_else(|| payload_error("no pull_request.number in payload".to_string()))
}
