use std::sync::Arc;

use crate::cli::RunCmd;
use crate::core::client::{
    HttpMetadataFetcher, LockClient, MetadataFetcher, MongoDbClient, MongoLockClient, MongoRefreshBacklog,
    MongoTokenDirectory, QueueClient, QueueDispatcher, RefreshBacklog, RefreshDispatcher, TokenDirectory, SQS,
};
use crate::types::params::cloud_provider::AWSCredentials;
use crate::types::params::database::MongoConfig;
use crate::types::params::{MarketplaceParams, QueueArgs, RefreshParams, ServerParams};
use crate::{RefresherError, RefresherResult};

/// Static settings of one refresher process.
#[derive(Debug, Clone)]
pub struct RefresherParams {
    pub refresh: RefreshParams,
    pub server: ServerParams,
}

/// The app config. Owns every collaborator of the scheduler as a trait object so tests can swap
/// any of them.
pub struct Config {
    params: RefresherParams,
    backlog: Arc<dyn RefreshBacklog>,
    lock: Arc<dyn LockClient>,
    fetcher: Arc<dyn MetadataFetcher>,
    dispatcher: Arc<dyn RefreshDispatcher>,
    tokens: Arc<dyn TokenDirectory>,
    queue: Arc<dyn QueueClient>,
}

/// Collaborators of a [`Config`] built outside of a run command.
pub struct ConfigClients {
    pub backlog: Arc<dyn RefreshBacklog>,
    pub lock: Arc<dyn LockClient>,
    pub fetcher: Arc<dyn MetadataFetcher>,
    pub dispatcher: Arc<dyn RefreshDispatcher>,
    pub tokens: Arc<dyn TokenDirectory>,
    pub queue: Arc<dyn QueueClient>,
}

impl Config {
    pub fn new(params: RefresherParams, clients: ConfigClients) -> Self {
        let ConfigClients { backlog, lock, fetcher, dispatcher, tokens, queue } = clients;
        Self { params, backlog, lock, fetcher, dispatcher, tokens, queue }
    }

    /// Setup the refresher
    pub async fn setup(run_cmd: &RunCmd) -> RefresherResult<Self> {
        let aws_cred = AWSCredentials::from(run_cmd.aws_config_args.clone());
        let aws_config = aws_cred.get_aws_config().await;

        let db: MongoConfig = run_cmd.mongodb_args.clone().into();
        let queue_args = QueueArgs::try_from(run_cmd.clone())?;
        let marketplace_params = MarketplaceParams::try_from(run_cmd.marketplace_args.clone())?;
        let params = RefresherParams {
            refresh: RefreshParams::from_cli_args(&marketplace_params.method, run_cmd.refresh_args.clone())?,
            server: ServerParams::from(run_cmd.server_args.clone()),
        };

        let database = Self::build_database_client(&db).await?;
        let queue: Arc<dyn QueueClient> = Arc::new(SQS::new(&aws_config, &queue_args)?);
        let fetcher = HttpMetadataFetcher::new(&marketplace_params)
            .map_err(|e| RefresherError::ConfigError(format!("Failed to build marketplace client: {e}")))?;

        let clients = ConfigClients {
            backlog: Arc::new(MongoRefreshBacklog::new(&database).await?),
            lock: Arc::new(MongoLockClient::new(&database)),
            fetcher: Arc::new(fetcher),
            dispatcher: Arc::new(QueueDispatcher::new(queue.clone())),
            tokens: Arc::new(MongoTokenDirectory::new(&database)),
            queue,
        };
        Ok(Self::new(params, clients))
    }

    async fn build_database_client(db_config: &MongoConfig) -> RefresherResult<MongoDbClient> {
        let database = MongoDbClient::setup(db_config).await?;
        database.health_check().await?;
        Ok(database)
    }

    /// Returns the refresh params
    pub fn refresh_params(&self) -> &RefreshParams {
        &self.params.refresh
    }

    /// Returns the server config
    pub fn server_config(&self) -> &ServerParams {
        &self.params.server
    }

    /// Returns the refresh method, also the key of the refresh lock
    pub fn method(&self) -> &str {
        &self.params.refresh.method
    }

    pub fn backlog(&self) -> &dyn RefreshBacklog {
        self.backlog.as_ref()
    }

    pub fn lock(&self) -> &dyn LockClient {
        self.lock.as_ref()
    }

    pub fn fetcher(&self) -> &dyn MetadataFetcher {
        self.fetcher.as_ref()
    }

    pub fn dispatcher(&self) -> &dyn RefreshDispatcher {
        self.dispatcher.as_ref()
    }

    pub fn tokens(&self) -> &dyn TokenDirectory {
        self.tokens.as_ref()
    }

    /// Returns the queue provider
    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }
}
