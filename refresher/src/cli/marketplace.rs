use clap::Args;
use url::Url;

/// Parameters used to reach the marketplace metadata provider.
#[derive(Debug, Clone, Args)]
pub struct MarketplaceCliArgs {
    /// Base URL of the provider API.
    #[arg(env = "METADATA_REFRESHER_MARKETPLACE_URL", long)]
    pub marketplace_url: Url,

    /// API key sent with every provider request.
    #[arg(env = "METADATA_REFRESHER_MARKETPLACE_API_KEY", long)]
    pub marketplace_api_key: Option<String>,

    /// Refresh method (provider identifier). Also the name of the distributed lock.
    #[arg(env = "METADATA_REFRESHER_REFRESH_METHOD", long, default_value = "opensea")]
    pub refresh_method: String,

    /// Number of tokens requested per provider page.
    #[arg(env = "METADATA_REFRESHER_MARKETPLACE_PAGE_SIZE", long, default_value_t = 50)]
    pub marketplace_page_size: u32,

    /// Timeout of a single provider request, in seconds.
    #[arg(env = "METADATA_REFRESHER_MARKETPLACE_TIMEOUT_SECS", long, default_value_t = 30)]
    pub marketplace_timeout_secs: u64,
}
