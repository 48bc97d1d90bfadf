use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, Span};
use uuid::Uuid;

use crate::core::client::adjudicator::{AdjudicatorClient, SubmissionOutcome, SubmitApplicationRequest};
use crate::core::client::queue::{send_json, QueueClient};
use crate::error::ConsumptionError;
use crate::types::message::{CreateApplicationMessage, PollApplicationMessage};
use crate::types::queue::QueueType;
use crate::worker::traits::message::{MessageDisposition, MessageHandler, MessageParser};

/// Submits new applications to the adjudicator and hands them over to the poll workers
pub struct CreateApplicationHandler {
    adjudicator: Arc<dyn AdjudicatorClient>,
    queue: Arc<dyn QueueClient>,
}

impl CreateApplicationHandler {
    pub fn new(adjudicator: Arc<dyn AdjudicatorClient>, queue: Arc<dyn QueueClient>) -> Self {
        Self { adjudicator, queue }
    }
}

/// A fresh id for the adjudicator. Our own id is never reused there since other
/// producers submit to the same adjudicator.
fn generate_external_id(our_application_id: &str) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if candidate != our_application_id {
            return candidate;
        }
    }
}

#[async_trait]
impl MessageHandler for CreateApplicationHandler {
    fn queue(&self) -> QueueType {
        QueueType::CreateApplication
    }

    async fn handle(&self, payload: &[u8]) -> Result<MessageDisposition, ConsumptionError> {
        let message = CreateApplicationMessage::parse_message(payload)?;
        let external_id = generate_external_id(&message.application_id);

        let span = Span::current();
        span.record("application_id", message.application_id.as_str());
        span.record("external_id", external_id.as_str());

        let request = SubmitApplicationRequest {
            id: external_id.clone(),
            first_name: message.first_name,
            last_name: message.last_name,
        };
        match self.adjudicator.submit_application(&request).await? {
            SubmissionOutcome::Accepted => {}
            SubmissionOutcome::DuplicateId => {
                info!("Adjudicator already knows the submitted id, requeueing for a fresh one");
                return Ok(MessageDisposition::Requeue);
            }
        }

        let poll_request =
            PollApplicationMessage { our_application_id: message.application_id, external_application_id: external_id };
        send_json(self.queue.as_ref(), QueueType::PollApplication, &poll_request)
            .await
            .map_err(|error| ConsumptionError::Publish { queue: QueueType::PollApplication, error })?;

        info!("Application submitted to adjudicator, status poll enqueued");
        Ok(MessageDisposition::Acknowledge)
    }
}
