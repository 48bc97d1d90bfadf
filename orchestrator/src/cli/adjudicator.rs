use clap::Args;
use url::Url;

/// Parameters used to reach the external adjudicator.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct AdjudicatorCliArgs {
    /// Base URL of the adjudicator service.
    #[arg(env = "LOAN_ORCHESTRATOR_ADJUDICATOR_URL", long, default_value = "http://localhost:8000")]
    pub adjudicator_url: Url,

    /// Path of the submission endpoint.
    #[arg(env = "LOAN_ORCHESTRATOR_ADJUDICATOR_CREATE_PATH", long, default_value = "/api/applications")]
    pub adjudicator_create_path: String,

    /// Path of the status endpoint.
    #[arg(env = "LOAN_ORCHESTRATOR_ADJUDICATOR_STATUS_PATH", long, default_value = "/api/jobs")]
    pub adjudicator_status_path: String,

    /// Request timeout in seconds. Requests never time out when unset.
    #[arg(env = "LOAN_ORCHESTRATOR_ADJUDICATOR_TIMEOUT_SECONDS", long)]
    pub adjudicator_timeout_seconds: Option<u64>,
}
