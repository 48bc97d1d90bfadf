use std::time::Duration;

use url::Url;

use crate::cli::adjudicator::AdjudicatorCliArgs;
use crate::OrchestratorError;

#[derive(Debug, Clone)]
pub struct AdjudicatorArgs {
    pub create_url: Url,
    pub status_url: Url,
    /// `None` leaves outbound calls without a deadline
    pub timeout: Option<Duration>,
}

impl TryFrom<AdjudicatorCliArgs> for AdjudicatorArgs {
    type Error = OrchestratorError;
    fn try_from(args: AdjudicatorCliArgs) -> Result<Self, Self::Error> {
        let create_url = args.adjudicator_url.join(&args.adjudicator_create_path).map_err(|e| {
            OrchestratorError::ConfigError(format!("Invalid adjudicator create path {}: {}", args.adjudicator_create_path, e))
        })?;
        let status_url = args.adjudicator_url.join(&args.adjudicator_status_path).map_err(|e| {
            OrchestratorError::ConfigError(format!("Invalid adjudicator status path {}: {}", args.adjudicator_status_path, e))
        })?;
        let timeout = match args.adjudicator_timeout_seconds {
            Some(0) => {
                return Err(OrchestratorError::ConfigError("Adjudicator timeout must be greater than 0".to_string()))
            }
            Some(seconds) => Some(Duration::from_secs(seconds)),
            None => None,
        };
        Ok(Self { create_url, status_url, timeout })
    }
}
