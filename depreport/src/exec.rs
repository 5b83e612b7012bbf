use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Everything a finished child process wrote, plus its exit code.
///
/// `status` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` did not finish within {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
    #[error("failed to collect output of `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs an external program with a discrete argument vector.
///
/// A non-zero exit status is not an error: npm exits 1 whenever audit or
/// outdated have something to report, so callers decide success by decoding
/// the output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ExecError>;
}

pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(timeout_secs = self.timeout.as_secs()))]
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ExecError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ExecError::Io {
                    program: program.to_string(),
                    source,
                });
            }
            Err(_) => {
                return Err(ExecError::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };
        debug!(
            status = ?result.status,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "command finished"
        );
        Ok(result)
    }
}
