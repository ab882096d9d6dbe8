//! File command handlers
//!
//! Handles uploading reference files that generations can draw on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use quill_client::QuillClient;
use quill_core::domain::file::UploadedFile;

/// File subcommands
#[derive(Subcommand)]
pub enum FileCommands {
    /// Upload a reference file
    Upload {
        /// Path to the file
        path: PathBuf,

        /// What the file is for (e.g. reference, brand-guide)
        #[arg(long)]
        purpose: Option<String>,
    },
    /// List uploaded files
    List,
    /// Delete an uploaded file
    Delete {
        /// File ID
        id: String,
    },
}

/// Handle file commands
///
/// # Arguments
/// * `command` - The file command to execute
/// * `client` - The API client
pub async fn handle_file_command(command: FileCommands, client: &QuillClient) -> Result<()> {
    match command {
        FileCommands::Upload { path, purpose } => {
            let file = client
                .upload_file(&path, purpose.as_deref())
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;

            println!("{}", "✓ File uploaded".green().bold());
            print_file(&file);
            println!(
                "{}",
                format!("Use it with: quill generate <topic> --file {}", file.id).dimmed()
            );
            Ok(())
        }
        FileCommands::List => {
            let files = client.list_files().await?;
            if files.is_empty() {
                println!("{}", "No files uploaded.".yellow());
            } else {
                println!("{}", format!("Found {} file(s):", files.len()).bold());
                println!();
                for file in &files {
                    print_file(file);
                }
            }
            Ok(())
        }
        FileCommands::Delete { id } => {
            client.delete_file(&id).await?;
            println!("{}", format!("✓ File {} deleted", id).green().bold());
            Ok(())
        }
    }
}

fn print_file(file: &UploadedFile) {
    println!("  {} {}", "▸".cyan(), file.filename.bold());
    println!("    ID:       {}", file.id);
    println!("    Size:     {} bytes", file.size_bytes);
    if let Some(mime_type) = &file.mime_type {
        println!("    Type:     {}", mime_type);
    }
    println!(
        "    Uploaded: {}",
        file.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}
