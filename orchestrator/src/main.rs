use clap::Parser as _;
use dotenvy::dotenv;
use loan_orchestrator::cli::{Cli, Commands, RunCmd, SetupCmd};
use loan_orchestrator::core::config::Config;
use loan_orchestrator::server::{setup_server, GatewayContext};
use loan_orchestrator::setup::setup;
use loan_orchestrator::types::queue::QueueType;
use loan_orchestrator::utils::logging::init_logging;
use loan_orchestrator::utils::signal_handler::{ShutdownSignal, SignalHandler};
use loan_orchestrator::worker::initialize_worker;
use loan_orchestrator::{OrchestratorError, OrchestratorResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Time allowed for in-flight gateway requests to finish after a shutdown signal
const GATEWAY_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = init_logging() {
        panic!("Failed to initialize logging: {}", e);
    }
    info!("Starting loan orchestrator");
    let cli = Cli::parse();

    let (role, result) = match &cli.command {
        Commands::Gateway { run_command } => ("gateway", run_gateway(run_command).await),
        Commands::CreateWorker { run_command } => {
            ("create worker", run_worker(run_command, QueueType::CreateApplication).await)
        }
        Commands::PollWorker { run_command } => ("poll worker", run_worker(run_command, QueueType::PollApplication).await),
        Commands::Setup { setup_command } => ("setup", setup_orchestrator(setup_command).await),
    };

    match result {
        Ok(()) => info!("Loan orchestrator {} finished", role),
        Err(e) => {
            error!(error = %e, error_chain = ?e, "Loan orchestrator {} failed", role);
            std::process::exit(1);
        }
    }
}

/// Serve the inbound API until a shutdown signal arrives
async fn run_gateway(run_cmd: &RunCmd) -> OrchestratorResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd)?);
    let repository = config.build_repository().await?;
    let queue = config.build_queue_client().await?;

    let (address, server_handle) = setup_server(config.server_config(), GatewayContext::new(repository, queue)).await?;
    info!(%address, "Gateway started");

    let mut signal_handler = SignalHandler::new();
    signal_handler.wait_for_shutdown().await?;
    signal_handler
        .handle_graceful_shutdown(
            || async move { server_handle.shutdown().await.map_err(anyhow::Error::from) },
            GATEWAY_SHUTDOWN_TIMEOUT,
        )
        .await?;
    Ok(())
}

/// Run one worker pool until a shutdown signal arrives or the pool fails
async fn run_worker(run_cmd: &RunCmd, queue_type: QueueType) -> OrchestratorResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd)?);
    let controller = initialize_worker(config, queue_type).await?;

    let mut signal_handler = SignalHandler::new();
    let shutdown_trigger = signal_handler.get_shutdown_trigger();
    let pool = tokio::spawn(async move {
        let result = controller.run().await;
        shutdown_trigger.notify_one();
        result
    });

    if signal_handler.wait_for_shutdown().await? == ShutdownSignal::Internal {
        return match pool.await {
            Ok(Ok(())) => Err(OrchestratorError::WorkerError(format!("{} pool stopped unexpectedly", queue_type))),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(OrchestratorError::WorkerError(format!("{} pool panicked: {}", queue_type, e))),
        };
    }

    // Unacknowledged deliveries are redelivered by the broker once the connection drops.
    pool.abort();
    Ok(())
}

/// setup_orchestrator - Declares queues and indexes
async fn setup_orchestrator(setup_cmd: &SetupCmd) -> OrchestratorResult<()> {
    setup(setup_cmd).await
}
