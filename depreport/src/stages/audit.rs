use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::context::ReportContext;
use crate::exec::CommandRunner;
use crate::markdown::AuditSection;
use crate::npm::AuditReport;

use super::Stage;

pub struct AuditStage {
    runner: Arc<dyn CommandRunner>,
    npm: String,
    max_rows: usize,
}

impl AuditStage {
    pub fn new(runner: Arc<dyn CommandRunner>, npm: impl Into<String>, max_rows: usize) -> Self {
        Self {
            runner,
            npm: npm.into(),
            max_rows,
        }
    }
}

#[async_trait]
impl Stage for AuditStage {
    #[instrument(skip(self, ctx), fields(npm = %self.npm))]
    async fn run(&self, ctx: &mut ReportContext) -> anyhow::Result<()> {
        let output = self.runner.run(&self.npm, &["audit", "--json"]).await?;
        let report = AuditReport::from_output(&output)?;

        let vulnerabilities = report.vulnerability_count();
        ctx.signals.total_dependencies = report.total_dependencies;
        ctx.signals.vulnerability_count = vulnerabilities;
        ctx.set_output("total-dependencies", report.total_dependencies);
        ctx.set_output("total-vulnerabilities", vulnerabilities);

        let section = AuditSection {
            report: &report,
            max_rows: self.max_rows,
        };
        ctx.push_section(self.name(), section.to_string());

        debug!(
            total_dependencies = report.total_dependencies,
            vulnerabilities,
            advisories = report.advisories.len(),
            "audit collected"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Audit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::ScriptedRunner;
    use crate::exec::CommandOutput;

    const LODASH_AUDIT: &str = r#"{
        "advisories": {
            "1523": {
                "module_name": "lodash",
                "findings": [{"version": "4.17.4", "paths": ["lodash"]}],
                "severity": "high",
                "title": "Prototype Pollution"
            }
        },
        "metadata": {
            "vulnerabilities": {"info": 0, "low": 2, "moderate": 0, "high": 1, "critical": 0},
            "totalDependencies": 57
        }
    }"#;

    #[tokio::test]
    async fn records_section_signals_and_outputs() {
        let runner = Arc::new(ScriptedRunner::new().respond_with(
            "npm audit --json",
            CommandOutput {
                stdout: LODASH_AUDIT.to_string(),
                stderr: String::new(),
                status: Some(1),
            },
        ));
        let stage = AuditStage::new(runner.clone(), "npm", 0);
        let mut ctx = ReportContext::default();

        stage.run(&mut ctx).await.unwrap();

        assert_eq!(runner.calls(), vec!["npm audit --json"]);
        assert_eq!(ctx.signals.total_dependencies, 57);
        assert_eq!(ctx.signals.vulnerability_count, 3);
        assert_eq!(ctx.sections.len(), 1);
        assert_eq!(ctx.sections[0].stage, "Audit");
        assert!(ctx.sections[0].markdown.contains("| lodash | lodash | high | Prototype Pollution |"));
        assert!(ctx.sections[0].markdown.contains("Vulnerabilities: 3"));
        assert_eq!(
            ctx.outputs,
            vec![
                ("total-dependencies".to_string(), "57".to_string()),
                ("total-vulnerabilities".to_string(), "3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn uses_configured_npm_program() {
        let runner = Arc::new(ScriptedRunner::new().respond("/opt/node/bin/npm audit --json", LODASH_AUDIT));
        let stage = AuditStage::new(runner.clone(), "/opt/node/bin/npm", 0);
        let mut ctx = ReportContext::default();

        stage.run(&mut ctx).await.unwrap();
        assert_eq!(runner.calls(), vec!["/opt/node/bin/npm audit --json"]);
    }

    #[tokio::test]
    async fn malformed_output_fails_without_section() {
        let runner = Arc::new(ScriptedRunner::new().respond("npm audit --json", "<html>rate limited</html>"));
        let stage = AuditStage::new(runner, "npm", 0);
        let mut ctx = ReportContext::default();

        let err = stage.run(&mut ctx).await.unwrap_err();
        assert!(err.to_string().contains("npm audit"));
        assert!(ctx.sections.is_empty());
        assert!(ctx.outputs.is_empty());
    }

    #[tokio::test]
    async fn identical_output_renders_identically() {
        let runner = Arc::new(ScriptedRunner::new().respond("npm audit --json", LODASH_AUDIT));
        let stage = AuditStage::new(runner, "npm", 0);

        let mut first = ReportContext::default();
        let mut second = ReportContext::default();
        stage.run(&mut first).await.unwrap();
        stage.run(&mut second).await.unwrap();

        assert_eq!(first.body(), second.body());
    }
}
