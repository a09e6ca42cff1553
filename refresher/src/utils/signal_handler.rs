use anyhow::{anyhow, Result};
use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Signals that stop the refresher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM, sent by the container runtime
    Terminate,
    /// SIGINT / Ctrl+C
    Interrupt,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
        }
    }
}

/// Wait for the first shutdown signal.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    use signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let received = tokio::select! {
        _ = sigterm.recv() => ShutdownSignal::Terminate,
        _ = sigint.recv() => ShutdownSignal::Interrupt,
    };
    info!(signal = %received, "Received shutdown signal");
    Ok(received)
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    signal::ctrl_c().await?;
    info!(signal = %ShutdownSignal::Interrupt, "Received shutdown signal");
    Ok(ShutdownSignal::Interrupt)
}

/// Run `shutdown_fn`, giving up after `timeout`.
pub async fn graceful_shutdown<F, Fut>(shutdown_fn: F, timeout: Duration) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    info!(timeout_secs = timeout.as_secs(), "Starting graceful shutdown");
    match tokio::time::timeout(timeout, shutdown_fn()).await {
        Ok(Ok(())) => {
            info!("Graceful shutdown completed");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(error = %e, "Graceful shutdown failed");
            Err(e)
        }
        Err(_) => {
            // An in-flight invocation is abandoned, its lock expires on its own.
            warn!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out, some tasks may be incomplete");
            Err(anyhow!("Shutdown timeout exceeded"))
        }
    }
}
