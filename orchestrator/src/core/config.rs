use std::sync::Arc;

use tracing::debug;

use crate::cli::RunCmd;
use crate::core::client::adjudicator::{AdjudicatorClient, HttpAdjudicatorClient};
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::database::{ApplicationRepository, ApplicationRepositoryClient};
use crate::core::client::queue::rabbitmq::RabbitMQ;
use crate::core::client::queue::QueueClient;
use crate::types::params::{AdjudicatorArgs, DatabaseArgs, QueueArgs, ServerParams, ServiceParams};
use crate::OrchestratorResult;

/// Process configuration, built once at startup and shared behind an `Arc`.
///
/// Holds parameters only. Each role connects the clients it needs through
/// the builder methods below.
#[derive(Debug, Clone)]
pub struct Config {
    database: DatabaseArgs,
    queue: QueueArgs,
    adjudicator: AdjudicatorArgs,
    service: ServiceParams,
    server: ServerParams,
}

impl Config {
    pub fn new(
        database: DatabaseArgs,
        queue: QueueArgs,
        adjudicator: AdjudicatorArgs,
        service: ServiceParams,
        server: ServerParams,
    ) -> Self {
        Self { database, queue, adjudicator, service, server }
    }

    pub fn from_run_cmd(run_cmd: &RunCmd) -> OrchestratorResult<Self> {
        let config = Self::new(
            DatabaseArgs::try_from(run_cmd.mongodb_args.clone())?,
            QueueArgs::try_from(run_cmd.rabbitmq_args.clone())?,
            AdjudicatorArgs::try_from(run_cmd.adjudicator_args.clone())?,
            ServiceParams::from(run_cmd.service_args.clone()),
            ServerParams::from(run_cmd.server_args.clone()),
        );
        debug!(?config, "Configuration built");
        Ok(config)
    }

    pub fn database_config(&self) -> &DatabaseArgs {
        &self.database
    }

    pub fn queue_config(&self) -> &QueueArgs {
        &self.queue
    }

    pub fn adjudicator_config(&self) -> &AdjudicatorArgs {
        &self.adjudicator
    }

    pub fn service_config(&self) -> &ServiceParams {
        &self.service
    }

    pub fn server_config(&self) -> &ServerParams {
        &self.server
    }

    /// Connect to MongoDB and wrap the collection in the application repository
    pub async fn build_repository(&self) -> OrchestratorResult<Arc<dyn ApplicationRepository>> {
        let mongodb = MongoDbClient::new(&self.database).await?;
        Ok(Arc::new(ApplicationRepositoryClient::new(Arc::new(mongodb))))
    }

    /// Connect to RabbitMQ, declaring both work queues
    pub async fn build_queue_client(&self) -> OrchestratorResult<Arc<dyn QueueClient>> {
        Ok(Arc::new(RabbitMQ::new(&self.queue).await?))
    }

    pub fn build_adjudicator_client(&self) -> OrchestratorResult<Arc<dyn AdjudicatorClient>> {
        Ok(Arc::new(HttpAdjudicatorClient::new(&self.adjudicator)?))
    }
}
