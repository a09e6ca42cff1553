use clap::Args;

/// Parameters used to config MongoDB.
#[derive(Debug, Clone, Args)]
pub struct MongoDbCliArgs {
    /// The connection string to the MongoDB server.
    #[arg(env = "METADATA_REFRESHER_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// The name of the database.
    #[arg(env = "METADATA_REFRESHER_DATABASE_NAME", long, default_value = "metadata_refresher")]
    pub mongodb_database_name: String,
}
