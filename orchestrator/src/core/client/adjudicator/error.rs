use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdjudicatorError {
    #[error("Adjudicator request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from adjudicator: {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to decode adjudicator response: {0}")]
    Decode(#[from] serde_json::Error),
}
