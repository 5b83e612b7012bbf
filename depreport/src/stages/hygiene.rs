use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::context::ReportContext;
use crate::exec::CommandRunner;
use crate::markdown::HygieneSection;
use crate::npm::DependencyHygieneReport;

use super::Stage;

/// Unused and missing dependencies via depcheck. Contributes no gate signal.
pub struct HygieneStage {
    runner: Arc<dyn CommandRunner>,
    npx: String,
}

impl HygieneStage {
    pub fn new(runner: Arc<dyn CommandRunner>, npx: impl Into<String>) -> Self {
        Self {
            runner,
            npx: npx.into(),
        }
    }
}

#[async_trait]
impl Stage for HygieneStage {
    #[instrument(skip(self, ctx), fields(npx = %self.npx))]
    async fn run(&self, ctx: &mut ReportContext) -> anyhow::Result<()> {
        let output = self.runner.run(&self.npx, &["depcheck", "--json"]).await?;
        let report = DependencyHygieneReport::from_output(&output)?;

        ctx.push_section(self.name(), HygieneSection { report: &report }.to_string());

        debug!(
            unused_production = report.unused_production.len(),
            unused_development = report.unused_development.len(),
            missing = report.missing.len(),
            "dependency hygiene collected"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Hygiene"
    }
}
