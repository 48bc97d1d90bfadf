/// Mongo server error code for a unique index violation
pub const DUPLICATE_KEY_ERROR_CODE: i32 = 11000;

/// Insert attempts made by the repository before an identifier collision is surfaced
pub const MAX_INSERT_ATTEMPTS: usize = 2;

/// AMQP delivery mode 2 marks a message as persistent
pub const PERSISTENT_DELIVERY_MODE: u8 = 2;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Query parameter the adjudicator status endpoint is keyed on
pub const ADJUDICATOR_STATUS_QUERY_PARAM: &str = "application_id";
