pub mod consumer;

use thiserror::Error;

use crate::core::client::adjudicator::AdjudicatorError;
use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
pub use consumer::ConsumptionError;

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Error types for the orchestrator
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Adjudicator error: {0}")]
    AdjudicatorError(#[from] AdjudicatorError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Worker error
    #[error("Worker error: {0}")]
    WorkerError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Orchestrator Error: {0}")]
    OrchestratorAnyHowError(#[from] anyhow::Error),
}
