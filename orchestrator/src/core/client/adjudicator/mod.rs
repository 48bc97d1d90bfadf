pub mod error;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

pub use error::AdjudicatorError;
pub use http::HttpAdjudicatorClient;

use crate::types::application::ApplicationStatus;

/// Body of a submission to the adjudicator.
///
/// `id` is generated by the create worker for every attempt and is never our
/// own application id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// How the adjudicator answered a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The adjudicator created a job under the submitted id
    Accepted,
    /// The submitted id is already taken by another job
    DuplicateId,
}

/// Status report for one submission.
///
/// Only `status` is read. The adjudicator echoes the submission id as `id`
/// and/or `application_id`, both of which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatusResponse {
    pub status: String,
}

impl ApplicationStatusResponse {
    /// The terminal status reported, `None` while the adjudicator is still deciding.
    /// Anything other than the exact wire form of a terminal status is treated as still deciding.
    pub fn terminal_status(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::iter()
            .find(|status| status.to_string() == self.status)
            .filter(ApplicationStatus::is_terminal)
    }
}

/// Trait defining the calls made to the external adjudicator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdjudicatorClient: Send + Sync {
    /// submit_application - Hand an application to the adjudicator
    async fn submit_application(
        &self,
        request: &SubmitApplicationRequest,
    ) -> Result<SubmissionOutcome, AdjudicatorError>;

    /// application_status - Ask for the status of a submission by the id it was submitted under
    async fn application_status(&self, external_id: &str) -> Result<ApplicationStatusResponse, AdjudicatorError>;
}
