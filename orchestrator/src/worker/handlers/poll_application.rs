use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, Span};

use crate::core::client::adjudicator::AdjudicatorClient;
use crate::core::client::database::ApplicationRepository;
use crate::error::ConsumptionError;
use crate::types::message::PollApplicationMessage;
use crate::types::queue::QueueType;
use crate::worker::traits::message::{MessageDisposition, MessageHandler, MessageParser};

/// Checks submitted applications and records their final status
pub struct PollApplicationHandler {
    adjudicator: Arc<dyn AdjudicatorClient>,
    repository: Arc<dyn ApplicationRepository>,
}

impl PollApplicationHandler {
    pub fn new(adjudicator: Arc<dyn AdjudicatorClient>, repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { adjudicator, repository }
    }
}

#[async_trait]
impl MessageHandler for PollApplicationHandler {
    fn queue(&self) -> QueueType {
        QueueType::PollApplication
    }

    async fn handle(&self, payload: &[u8]) -> Result<MessageDisposition, ConsumptionError> {
        let message = PollApplicationMessage::parse_message(payload)?;

        let span = Span::current();
        span.record("application_id", message.our_application_id.as_str());
        span.record("external_id", message.external_application_id.as_str());

        let report = self.adjudicator.application_status(&message.external_application_id).await?;
        // Redelivery is immediate, so a pending application is polled again right away.
        let Some(status) = report.terminal_status() else {
            debug!(status = %report.status, "Application still under adjudication, requeueing");
            return Ok(MessageDisposition::Requeue);
        };

        self.repository
            .update_status(&message.our_application_id, status)
            .await
            .map_err(|error| ConsumptionError::Persistence { application_id: message.our_application_id.clone(), error })?;

        info!(%status, "Recorded final application status");
        Ok(MessageDisposition::Acknowledge)
    }
}
