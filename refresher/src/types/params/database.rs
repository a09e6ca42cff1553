use crate::cli::database::MongoDbCliArgs;

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub connection_url: String,
    pub database_name: String,
}

impl From<MongoDbCliArgs> for MongoConfig {
    fn from(args: MongoDbCliArgs) -> Self {
        Self { connection_url: args.mongodb_connection_url, database_name: args.mongodb_database_name }
    }
}
