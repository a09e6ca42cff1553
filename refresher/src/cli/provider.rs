use clap::Args;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args)]
pub struct AWSConfigCliArgs {
    /// The AWS region. Falls back to the default provider chain when unset.
    #[arg(env = "AWS_REGION", long)]
    pub aws_region: Option<String>,
}
