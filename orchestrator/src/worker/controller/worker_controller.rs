use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};

use crate::core::client::queue::QueueClient;
use crate::types::queue::QueueType;
use crate::worker::consumer::forward_deliveries;
use crate::worker::controller::event_worker::EventWorker;
use crate::worker::traits::message::MessageHandler;
use crate::{OrchestratorError, OrchestratorResult};

/// Runs one worker pool: a broker consumer feeding `worker_count` event workers
pub struct WorkerController {
    queue_type: QueueType,
    worker_count: usize,
    queue: Arc<dyn QueueClient>,
    handler: Arc<dyn MessageHandler>,
}

impl WorkerController {
    pub fn new(queue: Arc<dyn QueueClient>, handler: Arc<dyn MessageHandler>, worker_count: usize) -> Self {
        Self { queue_type: handler.queue(), worker_count, queue, handler }
    }

    pub fn queue_type(&self) -> QueueType {
        self.queue_type
    }

    /// run - Subscribe to the queue and drive the pool.
    ///
    /// The worker count doubles as the prefetch limit and as the capacity of
    /// the handoff channel. Only returns on failure: subscribing, the
    /// consumer stream ending and the stream erroring are all fatal.
    pub async fn run(&self) -> OrchestratorResult<()> {
        if self.worker_count == 0 {
            return Err(OrchestratorError::WorkerError("worker pool needs at least one worker".to_string()));
        }
        let q = self.queue_type;

        let stream = self.queue.consume(q, self.worker_count).await.map_err(|e| {
            error!(queue = %q, error = %e, "Failed to subscribe to queue");
            e
        })?;

        let (sender, receiver) = mpsc::channel(self.worker_count);
        let receiver = Arc::new(Mutex::new(receiver));

        let mut worker_set = JoinSet::new();
        for index in 0..self.worker_count {
            let worker = EventWorker::new(index, self.handler.clone(), receiver.clone());
            worker_set.spawn(async move { worker.run().await }.instrument(info_span!("worker", q = %q, index)));
        }
        info!(queue = %q, workers = self.worker_count, "Worker pool started");

        let result = forward_deliveries(q, stream, sender).instrument(info_span!("consumer", q = %q)).await;
        if let Err(ref e) = result {
            error!(queue = %q, error = %e, "Broker consumer stopped, shutting the pool down");
        }

        // Unsettled deliveries go back to the queue once the broker channel closes.
        worker_set.abort_all();
        while worker_set.join_next().await.is_some() {}
        result
    }
}
