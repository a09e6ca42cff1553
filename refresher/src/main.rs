use anyhow::Context;
use clap::Parser as _;
use dotenvy::dotenv;
use metadata_refresher::cli::{Cli, Commands, RunCmd};
use metadata_refresher::core::config::Config;
use metadata_refresher::server::setup_server;
use metadata_refresher::utils::logging::init_logging;
use metadata_refresher::utils::signal_handler::{graceful_shutdown, wait_for_shutdown};
use metadata_refresher::worker::initialize_worker;
use metadata_refresher::RefresherResult;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Time granted to the in-flight invocation and open HTTP requests on shutdown
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    if let Err(e) = init_logging() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{e}");
        }
        return ExitCode::FAILURE;
    }
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            info!("Executing run command with args: {:?}", run_command);
            match run_refresher(run_command).await {
                Ok(()) => {
                    info!("Metadata refresher stopped");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(error = %e, error_chain = ?e, "Metadata refresher failed");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn run_refresher(run_cmd: &RunCmd) -> RefresherResult<()> {
    let config = Arc::new(Config::setup(run_cmd).await?);
    debug!("Configuration initialized");

    let (_, server_handle) = setup_server(config.clone()).await?;

    let cancellation_token = CancellationToken::new();
    let worker_handle = initialize_worker(config, cancellation_token.clone()).await?;

    wait_for_shutdown().await?;
    cancellation_token.cancel();

    graceful_shutdown(
        || async move {
            server_handle.shutdown().await.context("Server task failed")?;
            worker_handle.await.context("Refresh job runner task failed")?;
            Ok(())
        },
        SHUTDOWN_TIMEOUT,
    )
    .await?;
    Ok(())
}
