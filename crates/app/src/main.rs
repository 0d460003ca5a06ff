//! Flockloop command-line client.

use std::process::ExitCode;

use clap::Parser;
use flockloop::cli::Cli;
use flockloop::commands;
use flockloop_application::ApiError;
use flockloop_infrastructure::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_tracing(telemetry::DEFAULT_DIRECTIVE) {
        eprintln!("failed to initialise logging: {e}");
    }

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<ApiError>() {
                Some(api_error) => eprintln!("error: {}", api_error.user_message()),
                None => eprintln!("error: {error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
