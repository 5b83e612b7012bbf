use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use depreport::config::Config;
use depreport::event::{ActionEnv, GITHUB_API_BASE};

/// Summarize npm dependency health on a pull request
///
/// Every option falls back to the matching GitHub Actions input
/// (`INPUT_<NAME>`), so the binary can run as an action step unchanged.
#[derive(Parser)]
#[command(name = "depreport", version)]
pub struct Cli {
    /// Post the report as a pull request comment
    #[arg(long, env = "INPUT_COMMENT-ON-PR", default_value_t = false, action = ArgAction::Set)]
    pub comment_on_pr: bool,

    /// Leave the "Generated by" footer off the report
    #[arg(long, env = "INPUT_ELIDE-ATTRIBUTION", default_value_t = false, action = ArgAction::Set)]
    pub elide_attribution: bool,

    /// Fail when any package is outdated
    #[arg(long, env = "INPUT_FAIL-ON-OUTDATED", default_value_t = false, action = ArgAction::Set)]
    pub fail_on_outdated: bool,

    /// Fail when any vulnerability is reported
    #[arg(long, env = "INPUT_FAIL-ON-VULNERABILITY", default_value_t = false, action = ArgAction::Set)]
    pub fail_on_vulnerability: bool,

    /// Report unused and missing dependencies with depcheck
    #[arg(long, env = "INPUT_CHECK-UNUSED", default_value_t = true, action = ArgAction::Set)]
    pub check_unused: bool,

    /// Show at most this many rows per table (0 = all)
    #[arg(long, env = "INPUT_MAX-ROWS")]
    pub max_rows: Option<usize>,

    /// Older name of `--max-rows`; `--max-rows` wins when both are set
    #[arg(long, env = "INPUT_ELIDE", hide = true)]
    pub elide: Option<usize>,

    /// npm executable
    #[arg(long, env = "INPUT_NPM", default_value = "npm")]
    pub npm: String,

    /// npx executable, used to run depcheck
    #[arg(long, env = "INPUT_NPX", default_value = "npx")]
    pub npx: String,

    /// Seconds to wait for each npm command before killing it
    #[arg(long, env = "INPUT_COMMAND-TIMEOUT", default_value_t = 300)]
    pub command_timeout: u64,

    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

// Runner environment; normally set by GitHub Actions, overridable for local runs.
#[derive(Args)]
pub struct GitHubArgs {
    #[arg(long = "github-event-name", env = "GITHUB_EVENT_NAME", hide = true)]
    pub event_name: Option<String>,

    #[arg(long = "github-repository", env = "GITHUB_REPOSITORY", hide = true)]
    pub repository: Option<String>,

    #[arg(long = "github-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long = "github-sha", env = "GITHUB_SHA", hide = true)]
    pub sha: Option<String>,

    #[arg(long = "github-event-path", env = "GITHUB_EVENT_PATH", hide = true)]
    pub event_path: Option<PathBuf>,

    #[arg(long = "github-output", env = "GITHUB_OUTPUT", hide = true)]
    pub output_path: Option<PathBuf>,

    #[arg(long = "github-step-summary", env = "GITHUB_STEP_SUMMARY", hide = true)]
    pub summary_path: Option<PathBuf>,

    #[arg(long = "github-api-url", env = "GITHUB_API_URL", default_value = GITHUB_API_BASE, hide = true)]
    pub api_url: String,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            comment_on_pr: self.comment_on_pr,
            elide_attribution: self.elide_attribution,
            fail_on_outdated: self.fail_on_outdated,
            fail_on_vulnerability: self.fail_on_vulnerability,
            check_unused: self.check_unused,
            max_rows: self.max_rows.or(self.elide).unwrap_or(0),
            npm: self.npm.clone(),
            npx: self.npx.clone(),
            command_timeout: Duration::from_secs(self.command_timeout),
        }
    }

    pub fn action_env(&self) -> ActionEnv {
        let github = &self.github;
        ActionEnv {
            event_name: github.event_name.clone(),
            repository: github.repository.clone(),
            token: github.token.clone(),
            sha: github.sha.clone(),
            event_path: github.event_path.clone(),
            output_path: github.output_path.clone(),
            summary_path: github.summary_path.clone(),
            api_url: github.api_url.clone(),
        }
    }
}
