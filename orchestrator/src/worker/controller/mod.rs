pub mod event_worker;
pub mod worker_controller;

pub use event_worker::{post_processing, EventWorker};
pub use worker_controller::WorkerController;
