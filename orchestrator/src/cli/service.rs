use clap::Args;

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// Number of concurrent create workers. Also used as the broker prefetch limit.
    #[arg(env = "LOAN_ORCHESTRATOR_CREATE_WORKERS", long, default_value = "5", value_parser = parse_positive_usize)]
    pub create_workers: usize,

    /// Number of concurrent poll workers. Also used as the broker prefetch limit.
    #[arg(env = "LOAN_ORCHESTRATOR_POLL_WORKERS", long, default_value = "10", value_parser = parse_positive_usize)]
    pub poll_workers: usize,
}
