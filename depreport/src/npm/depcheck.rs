use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ToolOutputError;
use crate::exec::CommandOutput;

const TOOL: &str = "npx depcheck";
const EXPECTED: &str = "{ dependencies: [name], devDependencies: [name], missing: { <name>: [file] } }";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDepcheck {
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
    #[serde(default)]
    missing: Map<String, Value>,
}

/// Unused and missing packages as depcheck reported them, unsorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyHygieneReport {
    pub unused_production: Vec<String>,
    pub unused_development: Vec<String>,
    pub missing: Vec<String>,
}

impl DependencyHygieneReport {
    pub fn from_output(output: &CommandOutput) -> Result<Self, ToolOutputError> {
        let raw: RawDepcheck = super::decode(TOOL, EXPECTED, output)?;
        Ok(Self::from_raw(raw))
    }

    /// Decode JSON captured from a successful run of the tool.
    pub fn parse(json: &str) -> Result<Self, ToolOutputError> {
        Self::from_output(&CommandOutput {
            stdout: json.to_string(),
            status: Some(0),
            ..CommandOutput::default()
        })
    }

    fn from_raw(raw: RawDepcheck) -> Self {
        Self {
            unused_production: raw.dependencies,
            unused_development: raw.dev_dependencies,
            missing: raw.missing.into_iter().map(|(name, _)| name).collect(),
        }
    }
}
