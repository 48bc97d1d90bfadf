use serde::{Deserialize, Serialize};

/// Published by the gateway once per application, consumed by the create worker.
///
/// `application_id` is our record identifier. It is never sent to the
/// adjudicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApplicationMessage {
    pub application_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Published by the create worker after a successful submission and
/// redelivered to poll workers until the adjudicator reports a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollApplicationMessage {
    #[serde(rename = "our_id")]
    pub our_application_id: String,
    #[serde(rename = "application_id")]
    pub external_application_id: String,
}
