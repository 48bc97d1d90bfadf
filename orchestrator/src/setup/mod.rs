use tracing::{debug, info};

use crate::cli::SetupCmd;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::queue::rabbitmq::RabbitMQ;
use crate::types::params::{DatabaseArgs, QueueArgs};
use crate::OrchestratorResult;

/// Setup function that initializes all necessary resources.
///
/// Declares both work queues as durable and creates the indexes of the
/// applications collection. Every step is idempotent, so running it again is harmless.
pub async fn setup(setup_cmd: &SetupCmd) -> OrchestratorResult<()> {
    info!("Setting up resources for Loan Orchestrator...");

    let database_params = DatabaseArgs::try_from(setup_cmd.clone())?;
    let queue_params = QueueArgs::try_from(setup_cmd.clone())?;
    debug!("Database Params: {:?}", database_params);
    debug!("Queue Params: {:?}", queue_params);

    // Connecting declares every queue.
    RabbitMQ::new(&queue_params).await?;
    info!(
        create_queue = %queue_params.create_queue_name,
        poll_queue = %queue_params.poll_queue_name,
        "Queues declared"
    );

    let database = MongoDbClient::new(&database_params).await?;
    database.create_indexes().await?;
    info!(collection = %database_params.collection_name, "Database indexes created");

    Ok(())
}
