use clap::{Parser, Subcommand};

pub mod database;
pub mod marketplace;
pub mod provider;
pub mod queue;
pub mod refresh;
pub mod server;

pub use database::MongoDbCliArgs;
pub use marketplace::MarketplaceCliArgs;
pub use provider::AWSConfigCliArgs;
pub use queue::AWSSQSCliArgs;
pub use refresh::RefreshCliArgs;
pub use server::ServerCliArgs;

#[derive(Parser, Debug)]
#[command(
    name = "metadata-refresher",
    about = "Marketplace metadata refresher - drains per-collection refresh requests against an external provider",
    after_help = "Examples:\n  \
    metadata-refresher run --marketplace-url https://api.opensea.io/api/v2 --refresh-method opensea\n  \
    metadata-refresher run --marketplace-url http://localhost:8080 --parallel-fanout-limit 4"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the refresh scheduler, its job runner and the HTTP server
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[command(flatten)]
    pub mongodb_args: MongoDbCliArgs,

    #[command(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    #[command(flatten)]
    pub aws_sqs_args: AWSSQSCliArgs,

    #[command(flatten)]
    pub marketplace_args: MarketplaceCliArgs,

    #[command(flatten)]
    pub refresh_args: RefreshCliArgs,

    #[command(flatten)]
    pub server_args: ServerCliArgs,
}
