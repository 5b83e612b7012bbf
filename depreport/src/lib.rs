pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod exec;
pub mod gate;
pub mod github;
pub mod markdown;
pub mod npm;
pub mod outputs;
pub mod pipeline;
pub mod stages;
pub mod validate;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, instrument, warn};

use config::Config;
use context::{ReportContext, Signals};
use event::ActionEnv;
use exec::CommandRunner;
use gate::GateFailure;
use github::{Comment, GitHubClient};
use markdown::Attribution;
use pipeline::{Pipeline, PipelineBuilder};
use stages::{AuditStage, HygieneStage, OutdatedStage};

#[derive(Debug)]
pub struct Report {
    pub body: String,
    pub signals: Signals,
    pub comment: Option<Comment>,
}

#[derive(Debug)]
pub enum Outcome {
    Passed(Report),
    Failed { report: Report, gate: GateFailure },
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Self::Passed(report) | Self::Failed { report, .. } => report,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Passed(_))
    }
}

/// Validates the trigger, runs audit, outdated and (optionally) depcheck,
/// publishes the report, then evaluates the gates.
///
/// The comment is posted before the gates so a failing build still explains
/// itself on the pull request.
pub struct Reporter {
    config: Config,
    env: ActionEnv,
    runner: Arc<dyn CommandRunner>,
}

impl Reporter {
    pub fn new(config: Config, env: ActionEnv, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, env, runner }
    }

    pub fn pipeline(&self) -> Pipeline {
        PipelineBuilder::new()
            .stage(AuditStage::new(self.runner.clone(), &self.config.npm, self.config.max_rows))
            .stage(OutdatedStage::new(self.runner.clone(), &self.config.npm, self.config.max_rows))
            .stage_if(
                self.config.check_unused,
                HygieneStage::new(self.runner.clone(), &self.config.npx),
            )
            .build()
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> anyhow::Result<Outcome> {
        let target = validate::validate(&self.config, &self.env)?;
        info!(repository = %target.repository, "building dependency report");

        let mut ctx = ReportContext::default();
        self.pipeline().run(&mut ctx).await?;
        let body = self.compose(&ctx);

        if let Some(path) = &self.env.output_path {
            outputs::write_outputs(path, &ctx.outputs)?;
        }
        if let Some(path) = &self.env.summary_path {
            outputs::append_summary(path, &body)?;
        }

        let comment = match &target.comment {
            Some(to) => {
                let client = GitHubClient::new(to.token.clone(), &self.env.api_url)?;
                let comment = client
                    .create_comment(&target.repository, to.pull_request, &body)
                    .await
                    .with_context(|| format!("failed to comment on pull request #{}", to.pull_request))?;
                Some(comment)
            }
            None => None,
        };

        let report = Report {
            body,
            signals: ctx.signals,
            comment,
        };

        match gate::evaluate(&self.config, &report.signals) {
            Some(gate) => {
                warn!(%gate, "gate failed");
                Ok(Outcome::Failed { report, gate })
            }
            None => {
                info!(
                    vulnerabilities = report.signals.vulnerability_count,
                    outdated = report.signals.outdated_count,
                    "dependency report complete"
                );
                Ok(Outcome::Passed(report))
            }
        }
    }

    fn compose(&self, ctx: &ReportContext) -> String {
        let mut body = ctx.body();
        if !self.config.elide_attribution {
            body.push_str(&Attribution { sha: self.env.sha.as_deref() }.to_string());
        }
        body
    }
}
