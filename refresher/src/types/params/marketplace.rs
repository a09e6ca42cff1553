use crate::cli::marketplace::MarketplaceCliArgs;
use crate::error::RefresherError;
use std::time::Duration;
use url::Url;

/// Connection settings of the marketplace metadata provider.
#[derive(Debug, Clone)]
pub struct MarketplaceParams {
    pub base_url: Url,
    pub api_key: Option<String>,
    /// Provider identifier, doubles as the name of the refresh lock
    pub method: String,
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl TryFrom<MarketplaceCliArgs> for MarketplaceParams {
    type Error = RefresherError;
    fn try_from(args: MarketplaceCliArgs) -> Result<Self, Self::Error> {
        if args.refresh_method.trim().is_empty() {
            return Err(RefresherError::RunCommandError("Refresh method must not be empty".to_string()));
        }
        if args.marketplace_page_size == 0 {
            return Err(RefresherError::RunCommandError("Marketplace page size must be at least 1".to_string()));
        }
        Ok(Self {
            base_url: args.marketplace_url,
            api_key: args.marketplace_api_key.filter(|key| !key.is_empty()),
            method: args.refresh_method,
            page_size: args.marketplace_page_size,
            request_timeout: Duration::from_secs(args.marketplace_timeout_secs),
        })
    }
}
