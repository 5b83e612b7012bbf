pub mod audit;
pub mod hygiene;
pub mod outdated;

use async_trait::async_trait;

use crate::context::ReportContext;

#[async_trait]
pub trait Stage: Send + Sync {
    async fn run(&self, ctx: &mut ReportContext) -> anyhow::Result<()>;
    fn name(&self) -> &'static str;
}

pub use audit::AuditStage;
pub use hygiene::HygieneStage;
pub use outdated::OutdatedStage;
