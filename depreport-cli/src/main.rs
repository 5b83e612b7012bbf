mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use cli::Cli;
use depreport::exec::ProcessRunner;
use depreport::{Outcome, Reporter, outputs};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = args.config();
    let runner = ProcessRunner::new().with_timeout(config.command_timeout);
    let reporter = Reporter::new(config, args.action_env(), Arc::new(runner));

    match reporter.run().await {
        Ok(Outcome::Passed(report)) => {
            println!("{}", report.body);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Failed { report, gate }) => {
            println!("{}", report.body);
            println!("{}", outputs::error_command(&gate.to_string()));
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "dependency report failed");
            println!("{}", outputs::error_command(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
