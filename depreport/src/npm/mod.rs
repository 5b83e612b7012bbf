//! Typed decoding of the JSON printed by `npm audit`, `npm outdated` and
//! `npx depcheck`.

pub mod audit;
pub mod depcheck;
pub mod outdated;

pub use audit::{AuditAdvisory, AuditReport, VulnerabilityCounts};
pub use depcheck::DependencyHygieneReport;
pub use outdated::{OutdatedPackage, OutdatedReport};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ToolOutputError;
use crate::exec::CommandOutput;

const STDERR_EXCERPT_CHARS: usize = 300;

fn decode<T: DeserializeOwned>(
    tool: &'static str,
    expected: &'static str,
    output: &CommandOutput,
) -> Result<T, ToolOutputError> {
    let stdout = output.stdout.trim();
    if stdout.is_empty() {
        let reason = match excerpt(&output.stderr) {
            Some(stderr) => format!("no output on stdout (exit status {:?}); stderr: {stderr}", output.status),
            None => format!("no output (exit status {:?})", output.status),
        };
        return Err(ToolOutputError::new(tool, expected, reason));
    }

    let decoded = serde_json::from_str(stdout).map_err(|e| {
        let reason = match (output.success(), excerpt(&output.stderr)) {
            (false, Some(stderr)) => format!("{e} (exit status {:?}); stderr: {stderr}", output.status),
            (false, None) => format!("{e} (exit status {:?})", output.status),
            (true, _) => e.to_string(),
        };
        ToolOutputError::new(tool, expected, reason)
    })?;
    if !output.success() {
        if let Some(stderr) = excerpt(&output.stderr) {
            warn!(tool, status = ?output.status, %stderr, "tool wrote to stderr; using its JSON output anyway");
        }
    }
    Ok(decoded)
}

fn excerpt(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= STDERR_EXCERPT_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(STDERR_EXCERPT_CHARS).collect();
    Some(format!("{cut}..."))
}
