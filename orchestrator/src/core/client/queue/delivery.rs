use async_trait::async_trait;
use lapin::acker::Acker;
use lapin::options::{BasicAckOptions, BasicNackOptions, BasicRejectOptions};

use super::error::QueueError;

/// Settles a single broker delivery
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Acknowledge: Send + Sync {
    async fn ack(&self) -> Result<(), QueueError>;
    async fn nack(&self, requeue: bool) -> Result<(), QueueError>;
    async fn reject(&self, requeue: bool) -> Result<(), QueueError>;
}

/// One unit of work received from the broker.
///
/// Settling methods take `self`, so a delivery is acked, nacked or rejected
/// exactly once and cannot be touched afterwards.
pub struct Delivery {
    payload: Vec<u8>,
    redelivered: bool,
    acker: Box<dyn Acknowledge>,
}

impl Delivery {
    pub fn new(payload: Vec<u8>, redelivered: bool, acker: Box<dyn Acknowledge>) -> Self {
        Self { payload, redelivered, acker }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn redelivered(&self) -> bool {
        self.redelivered
    }

    pub async fn ack(self) -> Result<(), QueueError> {
        self.acker.ack().await
    }

    pub async fn nack(self, requeue: bool) -> Result<(), QueueError> {
        self.acker.nack(requeue).await
    }

    pub async fn reject(self, requeue: bool) -> Result<(), QueueError> {
        self.acker.reject(requeue).await
    }
}

impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delivery")
            .field("payload_len", &self.payload.len())
            .field("redelivered", &self.redelivered)
            .finish_non_exhaustive()
    }
}

/// Acknowledges through the AMQP channel the delivery arrived on
pub struct AmqpAcknowledger(Acker);

fn settle_error(error: lapin::Error) -> QueueError {
    QueueError::Acknowledgement(error.to_string())
}

#[async_trait]
impl Acknowledge for AmqpAcknowledger {
    async fn ack(&self) -> Result<(), QueueError> {
        self.0.ack(BasicAckOptions::default()).await.map_err(settle_error)?;
        Ok(())
    }

    async fn nack(&self, requeue: bool) -> Result<(), QueueError> {
        self.0.nack(BasicNackOptions { multiple: false, requeue }).await.map_err(settle_error)?;
        Ok(())
    }

    async fn reject(&self, requeue: bool) -> Result<(), QueueError> {
        self.0.reject(BasicRejectOptions { requeue }).await.map_err(settle_error)?;
        Ok(())
    }
}

impl From<lapin::message::Delivery> for Delivery {
    fn from(delivery: lapin::message::Delivery) -> Self {
        Self::new(delivery.data, delivery.redelivered, Box::new(AmqpAcknowledger(delivery.acker)))
    }
}
