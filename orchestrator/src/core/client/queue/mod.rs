pub mod delivery;
pub mod error;
pub mod rabbitmq;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Serialize;

pub use delivery::{Acknowledge, Delivery};
pub use error::QueueError;

use crate::types::queue::QueueType;

/// Lazy, non-restartable sequence of deliveries from one queue
pub type DeliveryStream = BoxStream<'static, Result<Delivery, QueueError>>;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// send_message - Durable, persistent publish of `payload` to `queue`.
    /// Returns once the broker has confirmed the message.
    async fn send_message(&self, queue: QueueType, payload: String) -> Result<(), QueueError>;

    /// consume - Attach to `queue` allowing at most `prefetch` unacknowledged deliveries in flight
    async fn consume(&self, queue: QueueType, prefetch: usize) -> Result<DeliveryStream, QueueError>;

    /// declare_queue - Idempotently declare `queue` as durable
    async fn declare_queue(&self, queue: QueueType) -> Result<(), QueueError>;
}

/// Serialize `message` as JSON and publish it to `queue`
pub async fn send_json<T: Serialize + ?Sized>(
    client: &dyn QueueClient,
    queue: QueueType,
    message: &T,
) -> Result<(), QueueError> {
    let payload = serde_json::to_string(message)?;
    client.send_message(queue, payload).await
}
