pub mod cloud_provider;
pub mod database;
pub mod marketplace;
pub mod refresh;
pub mod service;

pub use marketplace::MarketplaceParams;
pub use refresh::RefreshParams;
pub use service::ServerParams;

use crate::cli::RunCmd;
use crate::error::RefresherError;

/// QueueArgs - Arguments used to setup queue resources
#[derive(Debug, Clone)]
pub struct QueueArgs {
    pub queue_template_identifier: String,
}

impl TryFrom<RunCmd> for QueueArgs {
    type Error = RefresherError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        let queue_template_identifier = run_cmd.aws_sqs_args.queue_identifier;
        if !queue_template_identifier.contains("{}") {
            return Err(RefresherError::RunCommandError(format!(
                "Queue identifier {queue_template_identifier:?} must contain a {{}} placeholder"
            )));
        }
        Ok(Self { queue_template_identifier })
    }
}
