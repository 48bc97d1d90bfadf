use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),

    #[error("Failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Consumer for queue {0} closed")]
    ConsumerClosed(String),

    #[error("Failed to acknowledge delivery: {0}")]
    Acknowledgement(String),

    #[error("Broker refused to confirm publish to queue {0}")]
    PublishNotConfirmed(String),

    #[error("Prefetch count {0} is outside the range supported by the broker")]
    InvalidPrefetch(usize),
}
