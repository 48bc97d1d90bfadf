// Client abstractions module - contains all client interface traits

pub mod adjudicator;
pub mod database;
pub mod queue;

// Re-export commonly used types
pub use adjudicator::{AdjudicatorClient, HttpAdjudicatorClient};
pub use database::{mongodb::MongoDbClient, ApplicationCollection, ApplicationRepository, ApplicationRepositoryClient};
pub use queue::{rabbitmq::RabbitMQ, QueueClient};
