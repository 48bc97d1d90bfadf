use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Application not found: {0}")]
    NotFound(String),

    #[error("Duplicate key for application id: {0}")]
    DuplicateKey(String),

    #[error("Invalid application id: {0}")]
    InvalidId(String),

    #[error("Could not allocate a unique application id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),
}

impl DatabaseError {
    /// True when the caller addressed a record that does not exist, as opposed to a store failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_) | DatabaseError::InvalidId(_))
    }
}
