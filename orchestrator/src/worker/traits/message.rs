use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ConsumptionError;
use crate::types::message::{CreateApplicationMessage, PollApplicationMessage};
use crate::types::queue::QueueType;

/// What to tell the broker about a delivery that was handled without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDisposition {
    /// Work is done, ack
    Acknowledge,
    /// Work must be attempted again, nack with requeue
    Requeue,
}

/// MessageParser - Decode a delivery payload into the message carried by a queue
pub trait MessageParser: DeserializeOwned {
    const MESSAGE_TYPE: &'static str;

    fn parse_message(payload: &[u8]) -> Result<Self, ConsumptionError> {
        serde_json::from_slice(payload)
            .map_err(|error| ConsumptionError::MalformedPayload { message_type: Self::MESSAGE_TYPE, error })
    }
}

impl MessageParser for CreateApplicationMessage {
    const MESSAGE_TYPE: &'static str = "create application";
}

impl MessageParser for PollApplicationMessage {
    const MESSAGE_TYPE: &'static str = "poll application";
}

/// MessageHandler - Business logic run for every delivery of one queue.
///
/// An `Err` means the delivery can never succeed and is dropped without requeue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn queue(&self) -> QueueType;
    async fn handle(&self, payload: &[u8]) -> Result<MessageDisposition, ConsumptionError>;
}
