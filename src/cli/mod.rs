//! CLI module for the triage service
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `triage` - Triage a single ticket and print the decision
//! - `taxonomy` - Show the category members and defaults
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! triage serve
//!
//! # One-shot triage as JSON
//! triage triage "The ERP system is down" --json
//!
//! # Generate shell completions
//! triage completions bash > ~/.bash_completion.d/triage
//! ```

pub mod classify;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod taxonomy;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Support-ticket triage: classify, ground, route and dispatch
#[derive(Parser, Debug)]
#[command(
    name = "triage",
    version,
    about = "Support-ticket classification and routing service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the triage server
    Serve(ServeArgs),
    /// Triage one ticket from the command line
    Triage(TriageArgs),
    /// Show the taxonomy
    Taxonomy(TaxonomyArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "triage.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "TRIAGE_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "TRIAGE_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIAGE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct TriageArgs {
    /// Ticket text
    pub text: String,

    /// Caller-assigned ticket id (a UUID is generated otherwise)
    #[arg(short = 'i', long)]
    pub ticket_id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "triage.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct TaxonomyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "triage.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "triage.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
