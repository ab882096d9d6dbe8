//! Template command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use quill_client::QuillClient;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List available generation templates
    List,
}

/// Handle template commands
pub async fn handle_template_command(command: TemplateCommands, client: &QuillClient) -> Result<()> {
    match command {
        TemplateCommands::List => list_templates(client).await,
    }
}

async fn list_templates(client: &QuillClient) -> Result<()> {
    let templates = client.list_templates().await?;

    if templates.is_empty() {
        println!("{}", "No templates available.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} template(s):", templates.len()).bold()
    );
    println!();
    for template in templates {
        println!("  {} {} ({})", "▸".cyan(), template.name.bold(), template.id);
        println!("    Type: {}", template.content_type);
        if let Some(description) = &template.description {
            println!("    {}", description.dimmed());
        }
        println!();
    }

    Ok(())
}
