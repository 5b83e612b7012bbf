use std::path::PathBuf;

use thiserror::Error;

/// Problems with the trigger context, detected before any tool runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "this action can only run in response to pull request events; GITHUB_EVENT_NAME is {}",
        .0.as_deref().unwrap_or("not set")
    )]
    NotPullRequest(Option<String>),

    #[error("action was not run in the context of a GitHub repository; GITHUB_REPOSITORY not provided")]
    MissingRepository,

    #[error("GITHUB_REPOSITORY must look like owner/name, got {0:?}")]
    InvalidRepository(String),

    #[error("GITHUB_TOKEN not found; it is required to comment on the pull request")]
    MissingToken,

    #[error("GITHUB_EVENT_PATH not provided; cannot determine the pull request number")]
    MissingEventPath,

    #[error("failed to read pull request number from {path}: {reason}")]
    EventPayload { path: PathBuf, reason: String },
}

/// A tool printed something other than the JSON shape we decode.
#[derive(Debug, Error)]
#[error("unexpected output from `{tool}`: expected {expected}: {reason}")]
pub struct ToolOutputError {
    pub tool: &'static str,
    pub expected: &'static str,
    pub reason: String,
}

impl ToolOutputError {
    pub fn new(tool: &'static str, expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            tool,
            expected,
            reason: reason.into(),
        }
    }
}
