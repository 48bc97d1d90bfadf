use strum_macros::{Display, EnumIter};

/// The two work queues of the pipeline.
///
/// Queue names are resolved through [`crate::types::params::QueueArgs`], the
/// display value is only used for logging and span fields.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    #[strum(serialize = "create_application")]
    CreateApplication,
    #[strum(serialize = "poll_application")]
    PollApplication,
}
