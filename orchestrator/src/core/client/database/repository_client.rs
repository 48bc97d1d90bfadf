//! Application repository backed by an [`ApplicationCollection`]
//!
//! Owns identifier generation and the recovery from identifier collisions on
//! insert, and translates empty results into [`DatabaseError::NotFound`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::DatabaseError;
use super::{ApplicationCollection, ApplicationRepository};
use crate::types::application::{ApplicationEntry, ApplicationStatus};
use crate::types::constant::MAX_INSERT_ATTEMPTS;

pub struct ApplicationRepositoryClient {
    collection: Arc<dyn ApplicationCollection>,
    max_insert_attempts: usize,
}

impl ApplicationRepositoryClient {
    pub fn new(collection: Arc<dyn ApplicationCollection>) -> Self {
        Self { collection, max_insert_attempts: MAX_INSERT_ATTEMPTS }
    }

    fn validate_id(id: &str) -> Result<(), DatabaseError> {
        Uuid::parse_str(id).map(|_| ()).map_err(|_| DatabaseError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationRepositoryClient {
    async fn create(&self, first_name: &str, last_name: &str) -> Result<ApplicationEntry, DatabaseError> {
        for attempt in 1..=self.max_insert_attempts {
            let entry = ApplicationEntry::pending(Uuid::new_v4().to_string(), first_name, last_name);
            match self.collection.insert_one(entry.clone()).await {
                Ok(()) => return Ok(entry),
                Err(DatabaseError::DuplicateKey(id)) => {
                    warn!(application_id = %id, attempt, "Application id collided with an existing record, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
        Err(DatabaseError::IdExhausted { attempts: self.max_insert_attempts })
    }

    async fn get(&self, id: &str) -> Result<ApplicationEntry, DatabaseError> {
        Self::validate_id(id)?;
        self.collection.find_by_id(id).await?.ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }

    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationEntry>, DatabaseError> {
        self.collection.find_by_status(status).await
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<(), DatabaseError> {
        Self::validate_id(id)?;
        match self.collection.update_status_by_id(id, status).await? {
            0 => Err(DatabaseError::NotFound(id.to_string())),
            _ => {
                debug!(application_id = %id, %status, "Updated application status");
                Ok(())
            }
        }
    }

    async fn remove(&self, id: &str) -> Result<(), DatabaseError> {
        Self::validate_id(id)?;
        match self.collection.delete_by_id(id).await? {
            0 => Err(DatabaseError::NotFound(id.to_string())),
            _ => Ok(()),
        }
    }
}
