//! One-shot `triage` command

use crate::cli::output::{format_triage_json, format_triage_table};
use crate::cli::serve::load_config_file;
use crate::cli::TriageArgs;
use crate::config::TriageConfig;
use crate::engine::{TicketId, TriageEngine};
use crate::policy::BoundaryPolicy;
use tracing_subscriber::EnvFilter;

/// Handle `triage triage <TEXT>`: run the full pipeline once and return the
/// rendered result.
pub async fn handle_triage(args: &TriageArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_file(&args.config)?;
    config.validate()?;
    init_stderr_tracing(&config);

    let engine = TriageEngine::from_config(&config)?;
    engine.check_input(&args.text)?;

    let ticket_id = args
        .ticket_id
        .clone()
        .map(TicketId::new)
        .unwrap_or_else(TicketId::generate);
    let policy = BoundaryPolicy::from_config(&config.classifier);
    let result = policy.submit(&engine, &args.text, ticket_id).await?;

    if args.json {
        Ok(format_triage_json(&result)?)
    } else {
        Ok(format_triage_table(&result))
    }
}

/// Logs go to stderr so stdout carries only the result.
fn init_stderr_tracing(config: &TriageConfig) {
    let filter = crate::logging::build_filter_directives(&config.logging);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
