//! Quill CLI
//!
//! Command-line interface for the Quill content generation API.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill content generation CLI", long_about = None)]
struct Cli {
    /// API key
    #[arg(long, env = "QUILL_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API base URL
    #[arg(long, env = "QUILL_BASE_URL", default_value = "https://api.quill.dev")]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "QUILL_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log requests and poll attempts to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "quill=debug,quill_client=debug"
    } else {
        "quill=warn,quill_client=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        api_key: cli.api_key,
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
    };

    handle_command(cli.command, &config).await
}
