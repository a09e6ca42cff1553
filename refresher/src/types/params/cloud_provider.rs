use crate::cli::provider::AWSConfigCliArgs;
use aws_config::{Region, SdkConfig};

#[derive(Debug, Clone)]
pub struct AWSCredentials {
    pub region: Option<String>,
}

impl AWSCredentials {
    /// Credentials always come from the default provider chain, only the region can be pinned.
    pub async fn get_aws_config(&self) -> SdkConfig {
        let loader = aws_config::from_env();
        match &self.region {
            Some(region) => loader.region(Region::new(region.clone())).load().await,
            None => loader.load().await,
        }
    }
}

impl From<AWSConfigCliArgs> for AWSCredentials {
    fn from(args: AWSConfigCliArgs) -> Self {
        Self { region: args.aws_region }
    }
}
