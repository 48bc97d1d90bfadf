pub mod application;
pub mod constant;
pub mod message;
pub mod params;
pub mod queue;
