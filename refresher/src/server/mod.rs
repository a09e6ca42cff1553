pub mod error;
pub mod route;
pub mod types;

use crate::core::config::Config;
use crate::types::params::ServerParams;
use crate::{server::route::server_router, RefresherError, RefresherResult};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use error::RefreshRouteError;

/// Handle for managing the HTTP server lifecycle.
pub struct ServerHandle {
    shutdown_token: CancellationToken,
    task_handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Stops accepting connections and waits for in-flight requests to complete.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Initiating server graceful shutdown");
        self.shutdown_token.cancel();
        self.task_handle.await
    }
}

/// Binds the listener and serves the routes in a separate task.
pub async fn setup_server(config: Arc<Config>) -> RefresherResult<(SocketAddr, ServerHandle)> {
    let (api_server_url, listener) = get_server_url(config.server_config()).await?;

    let shutdown_token = CancellationToken::new();
    let server_token = shutdown_token.clone();

    let app = server_router(config);
    let task_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(server_token.cancelled_owned()).await {
            error!(error = %e, "Axum server stopped with an error");
        }
    });

    info!(address = %api_server_url, "Listening");
    Ok((api_server_url, ServerHandle { shutdown_token, task_handle }))
}

pub(crate) async fn get_server_url(
    server_params: &ServerParams,
) -> RefresherResult<(SocketAddr, tokio::net::TcpListener)> {
    // Tests bind an OS assigned port
    let port = if cfg!(test) { 0 } else { server_params.port };

    let address = format!("{}:{}", server_params.host, port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| RefresherError::ServerError(format!("Failed to bind {address}: {e}")))?;
    let api_server_url =
        listener.local_addr().map_err(|e| RefresherError::ServerError(format!("Unable to read bound address: {e}")))?;

    Ok((api_server_url, listener))
}
