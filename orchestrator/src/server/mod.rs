pub mod error;
pub mod route;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::core::client::database::ApplicationRepository;
use crate::core::client::queue::QueueClient;
use crate::server::route::server_router;
use crate::types::params::ServerParams;
use crate::{OrchestratorError, OrchestratorResult};

pub use error::{ApiError, ApiServiceResult};

/// Clients shared by the gateway route handlers
#[derive(Clone)]
pub struct GatewayContext {
    pub repository: Arc<dyn ApplicationRepository>,
    pub queue: Arc<dyn QueueClient>,
}

impl GatewayContext {
    pub fn new(repository: Arc<dyn ApplicationRepository>, queue: Arc<dyn QueueClient>) -> Self {
        Self { repository, queue }
    }
}

/// Handle for managing the HTTP server lifecycle.
pub struct ServerHandle {
    shutdown_token: CancellationToken,
    task_handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Stops accepting connections, lets in-flight requests finish and waits for the server to stop.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Initiating server graceful shutdown");
        self.shutdown_token.cancel();
        self.task_handle.await
    }
}

/// Binds the listener and serves the gateway routes on a separate task.
///
/// Returns the bound address, which differs from the configured one when port 0 was asked for.
pub async fn setup_server(
    server_params: &ServerParams,
    context: GatewayContext,
) -> OrchestratorResult<(SocketAddr, ServerHandle)> {
    let (api_server_url, listener) = get_server_url(server_params).await?;

    let shutdown_token = CancellationToken::new();
    let server_token = shutdown_token.clone();

    let app = server_router(context);
    let task_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(server_token.cancelled_owned()).await {
            error!(error = %e, "Gateway server stopped with an error");
        }
    });
    info!(address = %api_server_url, "Gateway listening");

    Ok((api_server_url, ServerHandle { shutdown_token, task_handle }))
}

pub(crate) async fn get_server_url(
    server_params: &ServerParams,
) -> OrchestratorResult<(SocketAddr, tokio::net::TcpListener)> {
    let address = format!("{}:{}", server_params.host, server_params.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| OrchestratorError::ServerError(format!("Failed to bind {}: {}", address, e)))?;
    let api_server_url = listener.local_addr()?;
    Ok((api_server_url, listener))
}
