use thiserror::Error;

use crate::core::client::adjudicator::AdjudicatorError;
use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
use crate::types::queue::QueueType;

/// Failure to process a single delivery.
///
/// None of these are retried: every variant ends with the delivery being
/// dropped without requeue.
#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Malformed {message_type} payload: {error}")]
    MalformedPayload { message_type: &'static str, error: serde_json::Error },

    #[error("Adjudicator call failed: {0}")]
    Adjudicator(#[from] AdjudicatorError),

    #[error("Failed to publish to {queue} queue: {error}")]
    Publish { queue: QueueType, error: QueueError },

    #[error("Failed to persist status of application {application_id}: {error}")]
    Persistence { application_id: String, error: DatabaseError },
}
