use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Lifecycle of a loan application.
///
/// `Pending` is the only initial state. `Completed` and `Rejected` are terminal
/// and only the poll worker moves a record into one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    Pending,
    Completed,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Completed | ApplicationStatus::Rejected)
    }
}

/// A loan application as stored in the applications collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: ApplicationStatus,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

impl ApplicationEntry {
    pub fn pending(id: String, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            status: ApplicationStatus::Pending,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}
