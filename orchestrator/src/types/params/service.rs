use crate::cli::server::ServerCliArgs;
use crate::cli::service::ServiceCliArgs;
use crate::types::queue::QueueType;

#[derive(Debug, Clone)]
pub struct ServiceParams {
    pub create_workers: usize,
    pub poll_workers: usize,
}

impl ServiceParams {
    /// Worker count of the pool draining `queue`, which is also its prefetch limit
    pub fn workers_for(&self, queue: QueueType) -> usize {
        match queue {
            QueueType::CreateApplication => self.create_workers,
            QueueType::PollApplication => self.poll_workers,
        }
    }
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self { create_workers: args.create_workers, poll_workers: args.poll_workers }
    }
}

#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(value: ServerCliArgs) -> Self {
        Self { host: value.host, port: value.port }
    }
}
