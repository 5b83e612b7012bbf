//! GitHub Actions side channels: step outputs, the job summary, and workflow
//! commands printed to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Append `name=value` lines to the `GITHUB_OUTPUT` file.
pub fn write_outputs(path: &Path, outputs: &[(String, String)]) -> Result<()> {
    let mut file = open_append(path)?;
    for (name, value) in outputs {
        writeln!(file, "{name}={value}").with_context(|| format!("failed to write {}", path.display()))?;
    }
    debug!(path = %path.display(), count = outputs.len(), "step outputs written");
    Ok(())
}

/// Append the report to the job summary shown on the workflow run page.
pub fn append_summary(path: &Path, markdown: &str) -> Result<()> {
    let mut file = open_append(path)?;
    file.write_all(markdown.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    if !markdown.ends_with('\n') {
        writeln!(file).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// `::error::` workflow command; the runner marks the step failed with this message.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn open_append(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}
