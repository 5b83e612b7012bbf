use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::context::ReportContext;
use crate::exec::CommandRunner;
use crate::markdown::OutdatedSection;
use crate::npm::OutdatedReport;

use super::Stage;

pub struct OutdatedStage {
    runner: Arc<dyn CommandRunner>,
    npm: String,
    max_rows: usize,
}

impl OutdatedStage {
    pub fn new(runner: Arc<dyn CommandRunner>, npm: impl Into<String>, max_rows: usize) -> Self {
        Self {
            runner,
            npm: npm.into(),
            max_rows,
        }
    }
}

#[async_trait]
impl Stage for OutdatedStage {
    #[instrument(skip(self, ctx), fields(npm = %self.npm))]
    async fn run(&self, ctx: &mut ReportContext) -> anyhow::Result<()> {
        let output = self.runner.run(&self.npm, &["outdated", "--json"]).await?;
        let report = OutdatedReport::from_output(&output)?;

        ctx.signals.outdated_count = report.count();
        ctx.set_output("total-outdated", report.count());

        let section = OutdatedSection {
            report: &report,
            max_rows: self.max_rows,
        };
        ctx.push_section(self.name(), section.to_string());

        debug!(outdated = report.count(), "outdated packages collected");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Outdated"
    }
}
