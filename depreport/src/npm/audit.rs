use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ToolOutputError;
use crate::exec::CommandOutput;

const TOOL: &str = "npm audit";
const EXPECTED: &str = "{ advisories: { <id>: { module_name, findings: [{ paths }], severity, title } }, \
                        metadata: { totalDependencies, vulnerabilities: { low, moderate, high, critical } } }";

#[derive(Deserialize)]
struct RawAudit {
    #[serde(default)]
    advisories: Map<String, Value>,
    metadata: RawMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    total_dependencies: u64,
    vulnerabilities: VulnerabilityCounts,
}

#[derive(Deserialize)]
struct RawAdvisory {
    module_name: String,
    #[serde(default)]
    findings: Vec<RawFinding>,
    severity: String,
    title: String,
}

#[derive(Deserialize)]
struct RawFinding {
    #[serde(default)]
    paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct VulnerabilityCounts {
    #[serde(default)]
    pub info: u64,
    pub low: u64,
    pub moderate: u64,
    pub high: u64,
    pub critical: u64,
}

impl VulnerabilityCounts {
    /// Informational findings are not vulnerabilities and are left out.
    pub fn total(&self) -> u64 {
        self.low
            .saturating_add(self.moderate)
            .saturating_add(self.high)
            .saturating_add(self.critical)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditAdvisory {
    pub module_name: String,
    /// First dependency path of the first finding, empty if npm reported none.
    pub path: String,
    pub severity: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub total_dependencies: u64,
    pub vulnerabilities: VulnerabilityCounts,
    /// In the order npm listed them.
    pub advisories: Vec<AuditAdvisory>,
}

impl AuditReport {
    pub fn from_output(output: &CommandOutput) -> Result<Self, ToolOutputError> {
        let raw: RawAudit = super::decode(TOOL, EXPECTED, output)?;
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

    fn from_raw(raw: RawAudit) -> Result<Self, ToolOutputError> {
        let advisories = raw
            .advisories
            .into_iter()
            .map(|(id, value)| {
                let advisory: RawAdvisory = serde_json::from_value(value)
                    .map_err(|e| ToolOutputError::new(TOOL, EXPECTED, format!("advisory {id}: {e}")))?;
                let path = advisory
                    .findings
                    .into_iter()
                    .next()
                    .and_then(|f| f.paths.into_iter().next())
                    .unwrap_or_default();
                Ok(AuditAdvisory {
                    module_name: advisory.module_name,
                    path,
                    severity: advisory.severity,
                    title: advisory.title,
                })
            })
            .collect::<Result<Vec<_>, ToolOutputError>>()?;

        Ok(Self {
            total_dependencies: raw.metadata.total_dependencies,
            vulnerabilities: raw.metadata.vulnerabilities,
            advisories,
        })
    }

    pub fn vulnerability_count(&self) -> u64 {
        self.vulnerabilities.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audit_json(advisories: Value, vulnerabilities: Value) -> String {
        json!({
            "actions": [],
            "advisories": advisories,
            "muted": [],
            "metadata": {
                "vulnerabilities": vulnerabilities,
                "dependencies": 100,
                "devDependencies": 20,
                "totalDependencies": 120
            }
        })
        .to_string()
    }

    #[test]
    fn parse_clean_audit() {
        let json = audit_json(
            json!({}),
            json!({"info": 0, "low": 0, "moderate": 0, "high": 0, "critical": 0}),
        );
        let report = AuditReport::parse(&json).unwrap();
        assert_eq!(report.total_dependencies, 120);
        assert!(report.advisories.is_empty());
        assert_eq!(report.vulnerability_count(), 0);
    }

    #[test]
    fn vulnerability_count_sums_severities_not_advisories() {
        let json = audit_json(
            json!({
                "1523": {
                    "module_name": "lodash",
                    "findings": [{"version": "4.17.4", "paths": ["lodash"]}],
                    "severity": "high",
                    "title": "Prototype Pollution"
                }
            }),
            json!({"info": 4, "low": 2, "moderate": 1, "high": 3, "critical": 1}),
        );
        let report = AuditReport::parse(&json).unwrap();
        assert_eq!(report.advisories.len(), 1);
        assert_eq!(report.vulnerability_count(), 7);
    }

    #[test]
    fn advisories_keep_npm_order() {
        let json = audit_json(
            json!({
                "900": {"module_name": "zeta", "findings": [{"paths": ["a>zeta"]}], "severity": "low", "title": "Z"},
                "100": {"module_name": "alpha", "findings": [{"paths": ["alpha"]}], "severity": "high", "title": "A"},
                "500": {"module_name": "mid", "findings": [{"paths": ["b>mid"]}], "severity": "moderate", "title": "M"}
            }),
            json!({"low": 1, "moderate": 1, "high": 1, "critical": 0}),
        );
        let report = AuditReport::parse(&json).unwrap();
        let names: Vec<&str> = report.advisories.iter().map(|a| a.module_name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn path_is_first_path_of_first_finding() {
        let json = audit_json(
            json!({
                "1": {
                    "module_name": "minimist",
                    "findings": [
                        {"paths": ["mkdirp>minimist", "optimist>minimist"]},
                        {"paths": ["other>minimist"]}
                    ],
                    "severity": "low",
                    "title": "Prototype Pollution"
                }
            }),
            json!({"low": 1, "moderate": 0, "high": 0, "critical": 0}),
        );
        let report = AuditReport::parse(&json).unwrap();
        assert_eq!(report.advisories[0].path, "mkdirp>minimist");
    }

    #[test]
    fn advisory_without_findings_has_empty_path() {
        let json = audit_json(
            json!({"1": {"module_name": "x", "findings": [], "severity": "low", "title": "T"}}),
            json!({"low": 1, "moderate": 0, "high": 0, "critical": 0}),
        );
        let report = AuditReport::parse(&json).unwrap();
        assert_eq!(report.advisories[0].path, "");
    }

    #[test]
    fn missing_metadata_is_an_error() {
        let err = AuditReport::parse(r#"{"advisories": {}}"#).unwrap_err();
        assert_eq!(err.tool, "npm audit");
        assert!(err.reason.contains("metadata"));
    }

    #[test]
    fn malformed_advisory_names_its_id() {
        let json = audit_json(
            json!({"42": {"module_name": "x"}}),
            json!({"low": 0, "moderate": 0, "high": 0, "critical": 0}),
        );
        let err = AuditReport::parse(&json).unwrap_err();
        assert!(err.reason.contains("advisory 42"));
    }

    #[test]
    fn from_output_uses_stdout() {
        let output = CommandOutput {
            stdout: audit_json(json!({}), json!({"low": 1, "moderate": 0, "high": 0, "critical": 0})),
            stderr: String::new(),
            status: Some(1),
        };
        let report = AuditReport::from_output(&output).unwrap();
        assert_eq!(report.vulnerability_count(), 1);
    }

    #[test]
    fn malformed_output_from_failed_run_carries_npm_error() {
        let output = CommandOutput {
            stdout: "npm WARN something".to_string(),
            stderr: "npm ERR! code ENOLOCK".to_string(),
            status: Some(1),
        };
        let err = AuditReport::from_output(&output).unwrap_err();
        assert!(err.to_string().contains("ENOLOCK"), "got: {err}");
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let counts = VulnerabilityCounts {
            low: u64::MAX,
            moderate: 1,
            ..VulnerabilityCounts::default()
        };
        assert_eq!(counts.total(), u64::MAX);
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = AuditReport::parse("").unwrap_err();
        assert!(err.reason.starts_with("no output"), "got: {}", err.reason);
    }
}
