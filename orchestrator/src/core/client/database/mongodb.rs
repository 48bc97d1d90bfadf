use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::DatabaseError;
use super::ApplicationCollection;
use crate::types::application::{ApplicationEntry, ApplicationStatus};
use crate::types::constant::DUPLICATE_KEY_ERROR_CODE;
use crate::types::params::DatabaseArgs;

/// MongoDB client implementation
pub struct MongoDbClient {
    client: Client,
    database: Arc<Database>,
    collection_name: String,
}

impl MongoDbClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&config.connection_uri).await?;
        let database = Arc::new(client.database(&config.database_name));
        Ok(Self { client, database, collection_name: config.collection_name.clone() })
    }

    /// Mongodb client uses Arc internally, reducing the cost of clone.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    fn applications(&self) -> Collection<ApplicationEntry> {
        self.database.collection(&self.collection_name)
    }

    /// create_indexes - Ensure the index backing list-by-status exists
    pub async fn create_indexes(&self) -> Result<(), DatabaseError> {
        let index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(IndexOptions::builder().name("status_1".to_string()).build())
            .build();
        self.applications().create_index(index, None).await?;
        info!(collection = %self.collection_name, "Ensured status index");
        Ok(())
    }
}

/// Whether the driver error is a unique index violation
pub(crate) fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_ERROR_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_ERROR_CODE,
        _ => false,
    }
}

#[async_trait]
impl ApplicationCollection for MongoDbClient {
    async fn insert_one(&self, entry: ApplicationEntry) -> Result<(), DatabaseError> {
        match self.applications().insert_one(&entry, None).await {
            Ok(_) => {
                debug!(application_id = %entry.id, "Inserted application");
                Ok(())
            }
            Err(e) if is_duplicate_key_error(&e) => Err(DatabaseError::DuplicateKey(entry.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ApplicationEntry>, DatabaseError> {
        Ok(self.applications().find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<ApplicationEntry>, DatabaseError> {
        let cursor = self.applications().find(doc! { "status": status.to_string() }, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_status_by_id(&self, id: &str, status: ApplicationStatus) -> Result<u64, DatabaseError> {
        let result = self
            .applications()
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status.to_string() } }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, DatabaseError> {
        let result = self.applications().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}
