use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::trace;

use crate::core::client::queue::{Delivery, DeliveryStream, QueueError};
use crate::types::queue::QueueType;
use crate::{OrchestratorError, OrchestratorResult};

/// forward_deliveries - Move deliveries from the broker stream into the handoff channel.
///
/// The channel is bounded and the broker never has more than prefetch
/// unacknowledged deliveries out, so a busy pool slows the consumer down.
/// Never returns `Ok`: the stream ending, the stream failing and every worker
/// having stopped are errors.
pub async fn forward_deliveries(
    queue: QueueType,
    mut stream: DeliveryStream,
    sender: mpsc::Sender<Delivery>,
) -> OrchestratorResult<()> {
    while let Some(next) = stream.next().await {
        let delivery = next?;
        trace!(queue = %queue, "Forwarding delivery to workers");
        if sender.send(delivery).await.is_err() {
            return Err(OrchestratorError::WorkerError(format!("all {} workers have stopped", queue)));
        }
    }
    Err(QueueError::ConsumerClosed(queue.to_string()).into())
}
