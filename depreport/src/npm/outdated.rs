use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ToolOutputError;
use crate::exec::CommandOutput;

const TOOL: &str = "npm outdated";
const EXPECTED: &str = "{ <package>: { current, wanted, latest } }";

#[derive(Deserialize)]
struct RawOutdated {
    /// Absent when the package is declared but not installed.
    current: Option<String>,
    wanted: String,
    latest: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutdatedPackage {
    pub name: String,
    pub current: Option<String>,
    pub wanted: String,
    pub latest: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutdatedReport {
    pub packages: Vec<OutdatedPackage>,
}

impl OutdatedReport {
    /// npm prints nothing at all when every package is current.
    pub fn from_output(output: &CommandOutput) -> Result<Self, ToolOutputError> {
        if output.stdout.trim().is_empty() && output.success() {
            return Ok(Self::default());
        }
        let raw: Map<String, Value> = super::decode(TOOL, EXPECTED, output)?;
        Self::from_raw(raw)
    }

    /// Decode JSON captured from a successful run of the tool.
    pub fn parse(json: &str) -> Result<Self, ToolOutputError> {
        Self::from_output(&CommandOutput {
            stdout: json.to_string(),
            status: Some(0),
            ..CommandOutput::default()
        })
    }

    fn from_raw(raw: Map<String, Value>) -> Result<Self, ToolOutputError> {
        let packages = raw
            .into_iter()
            .map(|(name, value)| {
                let entry: RawOutdated = serde_json::from_value(value)
                    .map_err(|e| ToolOutputError::new(TOOL, EXPECTED, format!("package {name}: {e}")))?;
                Ok(OutdatedPackage {
                    name,
                    current: entry.current,
                    wanted: entry.wanted,
                    latest: entry.latest,
                })
            })
            .collect::<Result<Vec<_>, ToolOutputError>>()?;
        Ok(Self { packages })
    }

    pub fn count(&self) -> u64 {
        self.packages.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
