//! Generation command handlers
//!
//! Handles starting single and bulk generations, showing their status,
//! and waiting for them to finish.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use quill_client::{CancellationToken, JobKind, PollConfig, QuillClient, UnsuccessfulPolicy};
use quill_core::domain::generation::{
    BulkGenerationStatus, GenerationStarted, GenerationStatus, JobState, SessionId,
};
use quill_core::domain::publication::ContentType;
use quill_core::dto::generation::{BulkGenerateRequest, GenerateRequest};

/// Options controlling how long to wait for a job
#[derive(Args, Debug, Default)]
pub struct WaitArgs {
    /// Maximum number of status checks (default: 60 single, 120 bulk)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seconds between status checks (default: 5 single, 10 bulk)
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// Stop waiting if a status check reports `success: false`
    #[arg(long)]
    pub fail_on_unsuccessful: bool,
}

impl WaitArgs {
    /// Poll configuration overriding the job kind's defaults, if any flag was given
    pub fn poll_config(&self, kind: JobKind) -> Option<PollConfig> {
        if self.max_attempts.is_none() && self.delay_secs.is_none() && !self.fail_on_unsuccessful
        {
            return None;
        }

        let mut config = kind.default_config();
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(delay_secs) = self.delay_secs {
            config.delay = Duration::from_secs(delay_secs);
        }
        if self.fail_on_unsuccessful {
            config.unsuccessful = UnsuccessfulPolicy::Fail;
        }
        Some(config)
    }
}

/// Arguments of `quill generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the publication should be about
    pub topic: String,

    /// Content type (article, blog_post, social_post, newsletter, product_description, email)
    #[arg(long = "type", default_value = "article")]
    pub content_type: ContentType,

    /// Writing tone (e.g. formal, playful)
    #[arg(long)]
    pub tone: Option<String>,

    /// Output language (e.g. en, fr)
    #[arg(long)]
    pub language: Option<String>,

    /// Target word count
    #[arg(long = "words")]
    pub word_count: Option<u32>,

    /// Keyword to include (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Template ID to generate from
    #[arg(long)]
    pub template: Option<String>,

    /// Uploaded file ID to use as reference (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Wait for the generation to finish and print the result
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: WaitArgs,
}

impl GenerateArgs {
    fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            topic: self.topic.clone(),
            content_type: self.content_type,
            tone: self.tone.clone(),
            language: self.language.clone(),
            word_count: self.word_count,
            keywords: self.keywords.clone(),
            template_id: self.template.clone(),
            file_ids: self.files.clone(),
        }
    }
}

/// Arguments of `quill bulk`
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// File with one topic per line (blank lines and `#` comments are skipped)
    pub topics_file: PathBuf,

    /// Content type applied to every topic
    #[arg(long = "type", default_value = "article")]
    pub content_type: ContentType,

    /// Writing tone applied to every topic
    #[arg(long)]
    pub tone: Option<String>,

    /// Wait for the bulk generation to finish
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: WaitArgs,
}

/// Start a generation, optionally waiting for it
pub async fn generate(client: &QuillClient, args: GenerateArgs) -> Result<()> {
    let started = client
        .generate(args.to_request())
        .await
        .context("Failed to start generation")?;

    print_started("Generation", &started);

    if args.wait {
        wait_single(client, &started.session_id, &args.poll).await?;
    }

    Ok(())
}

/// Start a bulk generation from a topics file, optionally waiting for it
pub async fn bulk(client: &QuillClient, args: BulkArgs) -> Result<()> {
    let contents = tokio::fs::read_to_string(&args.topics_file)
        .await
        .with_context(|| format!("Failed to read {}", args.topics_file.display()))?;

    let topics = parse_topics(&contents);
    if topics.is_empty() {
        bail!("No topics found in {}", args.topics_file.display());
    }

    let items = topics
        .into_iter()
        .map(|topic| {
            let mut req = GenerateRequest::new(topic, args.content_type);
            req.tone = args.tone.clone();
            req
        })
        .collect::<Vec<_>>();
    let count = items.len();
    tracing::debug!("Read {} topic(s) from {}", count, args.topics_file.display());

    let started = client
        .generate_bulk(BulkGenerateRequest::new(items))
        .await
        .context("Failed to start bulk generation")?;

    print_started(&format!("Bulk generation of {} item(s)", count), &started);

    if args.wait {
        wait_bulk(client, &started.session_id, &args.poll).await?;
    }

    Ok(())
}

/// Show the current status of a generation
pub async fn show_status(client: &QuillClient, session_id: &str) -> Result<()> {
    let session_id = parse_session_id(session_id)?;
    let envelope = client.get_generation_status(&session_id).await?;

    match envelope.data {
        Some(status) if envelope.success => print_generation_status(&status),
        _ => println!(
            "{}",
            format!(
                "Status unavailable: {}",
                envelope.error_message().unwrap_or("no details")
            )
            .yellow()
        ),
    }

    Ok(())
}

/// Show the current status of a bulk generation
pub async fn show_bulk_status(client: &QuillClient, session_id: &str) -> Result<()> {
    let session_id = parse_session_id(session_id)?;
    let envelope = client.get_bulk_generation_status(&session_id).await?;

    match envelope.data {
        Some(status) if envelope.success => print_bulk_status(&status),
        _ => println!(
            "{}",
            format!(
                "Status unavailable: {}",
                envelope.error_message().unwrap_or("no details")
            )
            .yellow()
        ),
    }

    Ok(())
}

/// Wait for an existing session
pub async fn wait(client: &QuillClient, session_id: &str, bulk: bool, args: &WaitArgs) -> Result<()> {
    let session_id = parse_session_id(session_id)?;
    if bulk {
        wait_bulk(client, &session_id, args).await
    } else {
        wait_single(client, &session_id, args).await
    }
}

async fn wait_single(client: &QuillClient, session_id: &SessionId, args: &WaitArgs) -> Result<()> {
    println!("{}", "Waiting for generation (Ctrl-C to stop)...".dimmed());

    let cancel = cancel_on_ctrl_c();
    let done = client
        .wait_for_generation_with_cancel(session_id, args.poll_config(JobKind::SINGLE), &cancel)
        .await?;

    if let Some(status) = done.data {
        print_generation_status(&status);
    }
    Ok(())
}

async fn wait_bulk(client: &QuillClient, session_id: &SessionId, args: &WaitArgs) -> Result<()> {
    println!("{}", "Waiting for bulk generation (Ctrl-C to stop)...".dimmed());

    let cancel = cancel_on_ctrl_c();
    let done = client
        .wait_for_bulk_generation_with_cancel(session_id, args.poll_config(JobKind::BULK), &cancel)
        .await?;

    if let Some(status) = done.data {
        print_bulk_status(&status);
    }
    Ok(())
}

/// Token cancelled when the user presses Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    token
}

fn parse_session_id(input: &str) -> Result<SessionId> {
    SessionId::parse(input).context("Session ID cannot be empty")
}

/// Non-empty, non-comment lines of a topics file
fn parse_topics(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn print_started(what: &str, started: &GenerationStarted) {
    println!("{}", format!("✓ {} started", what).green().bold());
    println!("  Session: {}", started.session_id.to_string().cyan());
    println!("  Status:  {}", colorize_state(Some(&started.status)));
}

/// Print a single generation status
fn print_generation_status(status: &GenerationStatus) {
    println!("{}", "Generation:".bold());
    if let Some(session_id) = &status.session_id {
        println!("  Session:     {}", session_id.to_string().cyan());
    }
    println!("  Status:      {}", colorize_state(status.status.as_ref()));

    if let Some(progress) = status.progress {
        println!("  Progress:    {}%", progress);
    }
    if let Some(publication_id) = &status.publication_id {
        println!("  Publication: {}", publication_id);
    }
    if let Some(error) = &status.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
    if let Some(title) = &status.title {
        println!("\n{}", title.bold());
    }
    if let Some(content) = &status.content {
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", content);
        println!("{}", "─".repeat(80).dimmed());
    }
}

/// Print a bulk generation status with per-item results
fn print_bulk_status(status: &BulkGenerationStatus) {
    println!("{}", "Bulk generation:".bold());
    if let Some(session_id) = &status.session_id {
        println!("  Session:   {}", session_id.to_string().cyan());
    }
    println!("  Status:    {}", colorize_state(status.status.as_ref()));
    println!(
        "  Progress:  {}/{} completed, {} failed",
        status.completed, status.total, status.failed
    );

    if !status.results.is_empty() {
        println!();
        for item in &status.results {
            let detail = match (&item.publication_id, &item.error) {
                (_, Some(error)) => error.red().to_string(),
                (Some(publication_id), None) => publication_id.dimmed().to_string(),
                (None, None) => String::new(),
            };
            println!(
                "  {} #{:<3} {} {}",
                "▸".cyan(),
                item.index,
                colorize_state(item.status.as_ref()),
                detail
            );
        }
    }
}

/// Colorize a job state for display
fn colorize_state(state: Option<&JobState>) -> ColoredString {
    match state {
        Some(JobState::Completed) => "completed".green(),
        Some(JobState::Failed) => "failed".red(),
        Some(state @ (JobState::Generating | JobState::Processing)) => state.as_str().cyan(),
        Some(state) => state.as_str().yellow(),
        None => "unknown".dimmed(),
    }
}
