use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn, Instrument, Span};
use uuid::Uuid;

use crate::core::client::queue::{Delivery, QueueError};
use crate::error::ConsumptionError;
use crate::types::queue::QueueType;
use crate::worker::traits::message::{MessageDisposition, MessageHandler};

/// Receiving half of the handoff channel, shared by every worker of a pool.
/// The lock is held only while waiting for the next delivery.
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<Delivery>>>;

/// One lane of a worker pool.
///
/// Takes a delivery from the handoff channel, runs the handler on it and
/// settles it with the broker before taking the next one.
pub struct EventWorker {
    index: usize,
    queue_type: QueueType,
    handler: Arc<dyn MessageHandler>,
    receiver: SharedReceiver,
}

impl EventWorker {
    pub fn new(index: usize, handler: Arc<dyn MessageHandler>, receiver: SharedReceiver) -> Self {
        Self { index, queue_type: handler.queue(), handler, receiver }
    }

    /// Create a single span for the processing of one delivery
    fn create_delivery_span(&self) -> Span {
        let correlation_id = Uuid::new_v4();
        tracing::info_span!(
            "delivery",
            queue = %self.queue_type,
            worker = self.index,
            correlation_id = %correlation_id,
            application_id = tracing::field::Empty,
            external_id = tracing::field::Empty
        )
    }

    async fn next_delivery(&self) -> Option<Delivery> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }

    /// run - Process deliveries until the handoff channel is closed
    pub async fn run(&self) {
        while let Some(delivery) = self.next_delivery().await {
            self.process_message(delivery).await;
        }
        info!("Handoff channel closed, worker stopping");
    }

    async fn process_message(&self, delivery: Delivery) {
        let span = self.create_delivery_span();
        async move {
            debug!(redelivered = delivery.redelivered(), "Processing delivery");
            let result = self.handler.handle(delivery.payload()).await;
            if let Err(e) = post_processing(result, delivery).await {
                error!(error = %e, "Failed to settle delivery with the broker");
            }
        }
        .instrument(span)
        .await
    }
}

/// post_processing - Settle a delivery according to the outcome of its handler.
///
/// Exactly one of ack, nack with requeue or nack without requeue is issued.
/// Failed deliveries are dropped since no dead letter queue is configured.
pub async fn post_processing(
    result: Result<MessageDisposition, ConsumptionError>,
    delivery: Delivery,
) -> Result<(), QueueError> {
    match result {
        Ok(MessageDisposition::Acknowledge) => delivery.ack().await,
        Ok(MessageDisposition::Requeue) => delivery.nack(true).await,
        Err(error) => {
            warn!(error = %error, "Failed to handle delivery, dropping it as no dead letter queue is configured");
            delivery.nack(false).await
        }
    }
}
