use clap::Args;

/// Parameters used to config MongoDB.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct MongoDBCliArgs {
    /// The connection string to the MongoDB server.
    #[arg(env = "LOAN_ORCHESTRATOR_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// The name of the database.
    #[arg(env = "LOAN_ORCHESTRATOR_DATABASE_NAME", long, default_value = "LoanApplications")]
    pub mongodb_database_name: String,

    /// The collection holding application records.
    #[arg(env = "LOAN_ORCHESTRATOR_COLLECTION_NAME", long, default_value = "Applications")]
    pub mongodb_collection_name: String,
}
