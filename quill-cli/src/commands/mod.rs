//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod account;
mod file;
mod generate;
mod publication;
mod template;

pub use file::FileCommands;
pub use generate::{BulkArgs, GenerateArgs, WaitArgs};
pub use publication::PublicationCommands;
pub use template::TemplateCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a publication
    Generate(GenerateArgs),
    /// Show the status of a generation
    Status {
        /// Session ID returned by `generate`
        session_id: String,
    },
    /// Wait for a generation (or bulk generation) to finish
    Wait {
        /// Session ID returned by `generate` or `bulk`
        session_id: String,

        /// The session belongs to a bulk generation
        #[arg(long)]
        bulk: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Generate one publication per topic listed in a file
    Bulk(BulkArgs),
    /// Show the status of a bulk generation
    BulkStatus {
        /// Session ID returned by `bulk`
        session_id: String,
    },
    /// Publication management
    Publication {
        #[command(subcommand)]
        command: PublicationCommands,
    },
    /// Generation templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Reference file management
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Show account plan and credits
    Account,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        Commands::Generate(args) => generate::generate(&client, args).await,
        Commands::Status { session_id } => generate::show_status(&client, &session_id).await,
        Commands::Wait {
            session_id,
            bulk,
            wait,
        } => generate::wait(&client, &session_id, bulk, &wait).await,
        Commands::Bulk(args) => generate::bulk(&client, args).await,
        Commands::BulkStatus { session_id } => {
            generate::show_bulk_status(&client, &session_id).await
        }
        Commands::Publication { command } => {
            publication::handle_publication_command(command, &client).await
        }
        Commands::Template { command } => template::handle_template_command(command, &client).await,
        Commands::File { command } => file::handle_file_command(command, &client).await,
        Commands::Account => account::show_account(&client).await,
    }
}
