use serde::{Deserialize, Serialize};

use crate::types::application::{ApplicationEntry, ApplicationStatus};

/// Body of `POST /api/application`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplicationRequest {
    pub first_name: String,
    pub last_name: String,
}

/// Query of `GET /api/application`
#[derive(Debug, Deserialize)]
pub struct ApplicationIdQuery {
    pub application_id: Option<String>,
}

/// Query of `GET /api/applications-with-status`
#[derive(Debug, Deserialize)]
pub struct ApplicationStatusQuery {
    pub status: Option<String>,
}

/// An application as shown to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationView {
    pub application_id: String,
    pub status: ApplicationStatus,
    pub first_name: String,
    pub last_name: String,
}

impl From<ApplicationEntry> for ApplicationView {
    fn from(entry: ApplicationEntry) -> Self {
        Self {
            application_id: entry.id,
            status: entry.status,
            first_name: entry.first_name,
            last_name: entry.last_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationsWithStatusResponse {
    pub applications: Vec<ApplicationView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: String,
}
