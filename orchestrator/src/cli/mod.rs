use clap::{Parser, Subcommand};

pub use server::ServerCliArgs;
pub use service::ServiceCliArgs;

pub mod adjudicator;
pub mod database;
pub mod queue;
pub mod server;
pub mod service;

#[derive(Parser, Debug)]
#[command(
    name = "loan-orchestrator",
    about = "Loan Orchestrator - submits loan applications to an external adjudicator and records the outcome",
    long_about = "Loan Orchestrator runs the message-driven loan application pipeline.\n\n\
    The gateway accepts applications over HTTP and enqueues them. Create workers submit them to the \
    adjudicator and enqueue a status poll. Poll workers persist the outcome once it is final.",
    after_help = "Examples:\n  \
    loan-orchestrator setup\n  \
    loan-orchestrator gateway --port 8081\n  \
    loan-orchestrator create-worker --create-workers 5\n  \
    loan-orchestrator poll-worker --poll-workers 10"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the inbound HTTP API
    Gateway {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Run the create worker pool
    #[command(long_about = "Consume create requests, submit them to the adjudicator and enqueue a status poll.")]
    CreateWorker {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Run the poll worker pool
    #[command(long_about = "Consume poll requests and persist terminal statuses reported by the adjudicator.")]
    PollWorker {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Declare queues and database indexes, then exit
    Setup {
        #[command(flatten)]
        setup_command: Box<SetupCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,

    #[clap(flatten)]
    pub rabbitmq_args: queue::rabbitmq::RabbitMQCliArgs,

    #[clap(flatten)]
    pub adjudicator_args: adjudicator::AdjudicatorCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,

    #[clap(flatten)]
    pub server_args: server::ServerCliArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SetupCmd {
    // Database
    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,

    // Queue
    #[clap(flatten)]
    pub rabbitmq_args: queue::rabbitmq::RabbitMQCliArgs,
}
