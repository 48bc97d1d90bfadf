pub mod consumer;
pub mod controller;
pub mod handlers;
pub mod traits;

use std::sync::Arc;

use tracing::info;

use crate::core::config::Config;
use crate::types::queue::QueueType;
use crate::worker::controller::WorkerController;
use crate::worker::handlers::{CreateApplicationHandler, PollApplicationHandler};
use crate::worker::traits::message::MessageHandler;
use crate::OrchestratorResult;

/// initialize_worker - Connect the clients a pool needs and build its controller
pub async fn initialize_worker(config: Arc<Config>, queue_type: QueueType) -> OrchestratorResult<WorkerController> {
    let queue = config.build_queue_client().await?;
    let adjudicator = config.build_adjudicator_client()?;

    let handler: Arc<dyn MessageHandler> = match queue_type {
        QueueType::CreateApplication => Arc::new(CreateApplicationHandler::new(adjudicator, queue.clone())),
        QueueType::PollApplication => {
            let repository = config.build_repository().await?;
            Arc::new(PollApplicationHandler::new(adjudicator, repository))
        }
    };

    let worker_count = config.service_config().workers_for(queue_type);
    info!(queue = %queue_type, worker_count, "Worker pool initialized");
    Ok(WorkerController::new(queue, handler, worker_count))
}
