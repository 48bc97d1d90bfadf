pub mod adjudicator;
pub mod service;

use crate::cli::{RunCmd, SetupCmd};
use crate::types::queue::QueueType;
use crate::OrchestratorError;
pub use adjudicator::AdjudicatorArgs;
pub use service::{ServerParams, ServiceParams};

/// DatabaseArgs - Arguments used to reach the application collection
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
    pub collection_name: String,
}

/// QueueArgs - Arguments used to reach the broker and name the two work queues
#[derive(Debug, Clone)]
pub struct QueueArgs {
    pub uri: String,
    pub create_queue_name: String,
    pub poll_queue_name: String,
}

impl QueueArgs {
    pub fn queue_name(&self, queue: QueueType) -> &str {
        match queue {
            QueueType::CreateApplication => &self.create_queue_name,
            QueueType::PollApplication => &self.poll_queue_name,
        }
    }
}

fn non_empty(value: &str, name: &str) -> Result<String, OrchestratorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OrchestratorError::ConfigError(format!("{} must not be empty", name)));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<crate::cli::database::mongodb::MongoDBCliArgs> for DatabaseArgs {
    type Error = OrchestratorError;
    fn try_from(args: crate::cli::database::mongodb::MongoDBCliArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            connection_uri: non_empty(&args.mongodb_connection_url, "MongoDB connection url")?,
            database_name: non_empty(&args.mongodb_database_name, "MongoDB database name")?,
            collection_name: non_empty(&args.mongodb_collection_name, "MongoDB collection name")?,
        })
    }
}

impl TryFrom<crate::cli::queue::rabbitmq::RabbitMQCliArgs> for QueueArgs {
    type Error = OrchestratorError;
    fn try_from(args: crate::cli::queue::rabbitmq::RabbitMQCliArgs) -> Result<Self, Self::Error> {
        let create_queue_name = non_empty(&args.create_queue_name, "create queue name")?;
        let poll_queue_name = non_empty(&args.poll_queue_name, "poll queue name")?;
        if create_queue_name == poll_queue_name {
            return Err(OrchestratorError::ConfigError(format!(
                "create and poll queues must differ, both are named {}",
                create_queue_name
            )));
        }
        Ok(Self { uri: non_empty(&args.rabbitmq_uri, "RabbitMQ uri")?, create_queue_name, poll_queue_name })
    }
}

impl TryFrom<RunCmd> for DatabaseArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        Self::try_from(run_cmd.mongodb_args)
    }
}

impl TryFrom<SetupCmd> for DatabaseArgs {
    type Error = OrchestratorError;
    fn try_from(setup_cmd: SetupCmd) -> Result<Self, Self::Error> {
        Self::try_from(setup_cmd.mongodb_args)
    }
}

impl TryFrom<RunCmd> for QueueArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        Self::try_from(run_cmd.rabbitmq_args)
    }
}

impl TryFrom<SetupCmd> for QueueArgs {
    type Error = OrchestratorError;
    fn try_from(setup_cmd: SetupCmd) -> Result<Self, Self::Error> {
        Self::try_from(setup_cmd.rabbitmq_args)
    }
}
