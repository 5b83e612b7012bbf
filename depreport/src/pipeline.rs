use anyhow::Context;
use tracing::{debug, instrument};

use crate::context::ReportContext;
use crate::stages::Stage;

/// Ordered stages run one after another against a single context.
///
/// The first failing stage aborts the run; later stages never start.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    #[instrument(skip(self, ctx), fields(stage_count = self.stages.len()))]
    pub async fn run(&self, ctx: &mut ReportContext) -> anyhow::Result<()> {
        for stage in &self.stages {
            stage
                .run(ctx)
                .await
                .with_context(|| format!("{} stage failed", stage.name()))?;
            debug!(stage = stage.name(), "stage complete");
        }
        Ok(())
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { stages: vec![] }
    }

    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn stage_if(self, enabled: bool, stage: impl Stage + 'static) -> Self {
        if enabled { self.stage(stage) } else { self }
    }

    pub fn build(self) -> Pipeline {
        Pipeline { stages: self.stages }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
