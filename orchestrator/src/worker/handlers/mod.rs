pub mod create_application;
pub mod poll_application;

pub use create_application::CreateApplicationHandler;
pub use poll_application::PollApplicationHandler;
