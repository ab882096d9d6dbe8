//! Publication command handlers
//!
//! Handles listing, inspecting, updating and deleting generated publications.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use quill_client::QuillClient;
use quill_core::domain::publication::{ContentType, Publication, PublicationStatus};
use quill_core::dto::publication::{ListPublicationsQuery, UpdatePublication};

/// Publication subcommands
#[derive(Subcommand)]
pub enum PublicationCommands {
    /// List publications
    List {
        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        limit: Option<u32>,

        /// Only show publications with this status (draft, published, archived)
        #[arg(long)]
        status: Option<PublicationStatus>,

        /// Only show publications of this content type
        #[arg(long = "type")]
        content_type: Option<ContentType>,

        /// Free-text search over titles and content
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a publication with its content
    Get {
        /// Publication ID
        id: String,

        /// Print the raw publication as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a publication's title or status
    Update {
        /// Publication ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New status (draft, published, archived)
        #[arg(long)]
        status: Option<PublicationStatus>,

        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Delete a publication
    Delete {
        /// Publication ID
        id: String,
    },
}

/// Handle publication commands
///
/// # Arguments
/// * `command` - The publication command to execute
/// * `client` - The API client
pub async fn handle_publication_command(
    command: PublicationCommands,
    client: &QuillClient,
) -> Result<()> {
    match command {
        PublicationCommands::List {
            page,
            limit,
            status,
            content_type,
            search,
        } => {
            let query = ListPublicationsQuery {
                page,
                limit,
                status,
                content_type,
                search,
            };
            list_publications(client, &query).await
        }
        PublicationCommands::Get { id, json } => get_publication(client, &id, json).await,
        PublicationCommands::Update {
            id,
            title,
            status,
            tags,
        } => {
            let update = UpdatePublication {
                title,
                content: None,
                status,
                tags: (!tags.is_empty()).then_some(tags),
            };
            update_publication(client, &id, &update).await
        }
        PublicationCommands::Delete { id } => delete_publication(client, &id).await,
    }
}

/// List publications matching the query
async fn list_publications(client: &QuillClient, query: &ListPublicationsQuery) -> Result<()> {
    let page = client.list_publications(query).await?;

    if page.items.is_empty() {
        println!("{}", "No publications found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Showing {} of {} publication(s) (page {}):",
            page.items.len(),
            page.total,
            page.page
        )
        .bold()
    );
    println!();
    for publication in &page.items {
        print_publication_summary(publication);
    }
    if page.has_more() {
        println!(
            "{}",
            format!("More results available: --page {}", page.page + 1).dimmed()
        );
    }

    Ok(())
}

/// Show a single publication
async fn get_publication(client: &QuillClient, id: &str, json: bool) -> Result<()> {
    let publication = client.get_publication(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&publication)?);
        return Ok(());
    }

    print_publication_summary(&publication);
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", publication.content);
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}

async fn update_publication(
    client: &QuillClient,
    id: &str,
    update: &UpdatePublication,
) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update: pass --title, --status or --tag");
    }

    let publication = client.update_publication(id, update).await?;
    println!("{}", "✓ Publication updated".green().bold());
    print_publication_summary(&publication);

    Ok(())
}

async fn delete_publication(client: &QuillClient, id: &str) -> Result<()> {
    client.delete_publication(id).await?;
    println!("{}", format!("✓ Publication {} deleted", id).green().bold());
    Ok(())
}

/// Print a publication summary
fn print_publication_summary(publication: &Publication) {
    println!("  {} {}", "▸".cyan(), publication.title.bold());
    println!("    ID:       {}", publication.id);
    println!("    Type:     {}", publication.content_type);
    println!("    Status:   {}", colorize_status(&publication.status));
    println!("    Words:    {}", publication.word_count);
    if !publication.tags.is_empty() {
        println!("    Tags:     {}", publication.tags.join(", "));
    }
    println!(
        "    Updated:  {}",
        publication
            .updated_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Colorize publication status for display
fn colorize_status(status: &PublicationStatus) -> ColoredString {
    match status {
        PublicationStatus::Published => status.as_str().green(),
        PublicationStatus::Draft => status.as_str().yellow(),
        PublicationStatus::Archived => status.as_str().dimmed(),
    }
}
