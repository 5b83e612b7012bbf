use tracing::debug;

use crate::config::Config;
use crate::error::ConfigError;
use crate::event::{self, ActionEnv, PULL_REQUEST_EVENT, Repository};

/// Where the report goes, established before any tool runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub repository: Repository,
    /// Present only when commenting is enabled.
    pub comment: Option<CommentTarget>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct CommentTarget {
    pub pull_request: u64,
    pub token: String,
}

impl std::fmt::Debug for CommentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentTarget")
            .field("pull_request", &self.pull_request)
            .field("token", &"***")
            .finish()
    }
}

/// The token is only demanded when the report will be posted.
pub fn validate(config: &Config, env: &ActionEnv) -> Result<Target, ConfigError> {
    if env.event_name.as_deref() != Some(PULL_REQUEST_EVENT) {
        return Err(ConfigError::NotPullRequest(env.event_name.clone()));
    }

    let repository: Repository = env
        .repository
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or(ConfigError::MissingRepository)?
        .parse()?;

    let comment = if config.comment_on_pr {
        let token = env
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let event_path = env.event_path.as_deref().ok_or(ConfigError::MissingEventPath)?;
        let pull_request = event::pull_request_number(event_path)?;
        Some(CommentTarget { pull_request, token })
    } else {
        None
    };

    debug!(repository = %repository, pull_request = ?comment.as_ref().map(|c| c.pull_request), "trigger context validated");
    Ok(Target { repository, comment })
}
