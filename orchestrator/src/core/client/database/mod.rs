pub mod error;
pub mod mongodb;
pub mod repository_client;

use async_trait::async_trait;
pub use error::DatabaseError;
pub use repository_client::ApplicationRepositoryClient;

use crate::types::application::{ApplicationEntry, ApplicationStatus};

/// Raw keyed operations over the applications collection.
///
/// Implementations must report a unique index violation on insert as
/// [`DatabaseError::DuplicateKey`] so the repository can retry with a fresh id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationCollection: Send + Sync {
    async fn insert_one(&self, entry: ApplicationEntry) -> Result<(), DatabaseError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ApplicationEntry>, DatabaseError>;
    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationEntry>, DatabaseError>;
    /// Returns the number of matched records
    async fn update_status_by_id(&self, id: &str, status: ApplicationStatus) -> Result<u64, DatabaseError>;
    /// Returns the number of deleted records
    async fn delete_by_id(&self, id: &str) -> Result<u64, DatabaseError>;
}

/// Application persistence as seen by the gateway and the poll worker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// create - Insert a pending application under a freshly generated id.
    /// Identifier collisions are retried internally and never reach the caller.
    async fn create(&self, first_name: &str, last_name: &str) -> Result<ApplicationEntry, DatabaseError>;
    /// get - Fetch an application, `NotFound` when the id is unknown
    async fn get(&self, id: &str) -> Result<ApplicationEntry, DatabaseError>;
    /// list_by_status - All applications currently in `status`, possibly none
    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationEntry>, DatabaseError>;
    /// update_status - Set the status of an application. Repeating the same update is harmless.
    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<(), DatabaseError>;
    /// remove - Delete an application, used to roll back a create whose message could not be published
    async fn remove(&self, id: &str) -> Result<(), DatabaseError>;
}
