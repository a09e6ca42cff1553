pub mod controller;
pub mod parser;
pub mod refresh;
pub mod trigger;

use crate::core::config::Config;
use crate::worker::controller::RefreshJobRunner;
use crate::worker::trigger::RefreshTrigger;
use crate::RefresherResult;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Resume any backlog left by a previous process and spawn the job runner.
pub async fn initialize_worker(
    config: Arc<Config>,
    cancellation_token: CancellationToken,
) -> RefresherResult<JoinHandle<()>> {
    if RefreshTrigger::new(config.clone()).resume().await? {
        info!(method = %config.method(), "Resumed pending refresh backlog");
    }

    let runner = RefreshJobRunner::new(config, cancellation_token);
    Ok(tokio::spawn(async move {
        if let Err(e) = runner.run().await {
            error!(error = %e, "Refresh job runner failed");
        }
    }))
}
