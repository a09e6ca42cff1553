use clap::Args;

/// Parameters used to config AWS SQS.
#[derive(Debug, Clone, Args)]
pub struct AWSSQSCliArgs {
    /// The name template of the queues.
    /// {} will be replaced by the queue type, i.e for the trigger queue: mr_refresh_trigger_queue
    #[arg(env = "METADATA_REFRESHER_AWS_SQS_QUEUE_IDENTIFIER", long, default_value = "mr_{}_queue")]
    pub queue_identifier: String,
}
