//! Generation API endpoints

use async_trait::async_trait;
use quill_core::domain::generation::{
    BulkGenerationStatus, GenerationStarted, GenerationStatus, SessionId,
};
use quill_core::dto::generation::{BulkGenerateRequest, GenerateRequest, MAX_BULK_ITEMS};
use quill_core::dto::response::ApiResponse;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::QuillClient;
use crate::error::{ClientError, Result};
use crate::poller::{JobKind, PollConfig, Poller, StatusFetcher};

impl QuillClient {
    // =============================================================================
    // Single Generation
    // =============================================================================

    /// Start generating a publication
    ///
    /// # Arguments
    /// * `req` - Topic, content type and optional style parameters
    ///
    /// # Returns
    /// The session ID of the generation job
    ///
    /// # Example
    /// ```no_run
    /// # use quill_client::{ClientConfig, QuillClient};
    /// # use quill_core::domain::publication::ContentType;
    /// # use quill_core::dto::generation::GenerateRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = QuillClient::new(ClientConfig::new("qk_test"))?;
    /// let started = client
    ///     .generate(GenerateRequest::new("Ocean tides", ContentType::Article).with_tone("playful"))
    ///     .await?;
    /// println!("session: {}", started.session_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, req: GenerateRequest) -> Result<GenerationStarted> {
        validate_generate_request(&req)?;

        let response = self
            .request(Method::POST, &["v1", "generate"])?
            .json(&req)
            .send()
            .await?;

        let started: GenerationStarted = self.handle_response(response).await?;
        info!("Started generation {}", started.session_id);
        Ok(started)
    }

    /// Check the status of a generation job
    ///
    /// The envelope is returned as-is, including `success: false` responses,
    /// so callers (and the poller) can decide how to treat them.
    pub async fn get_generation_status(
        &self,
        session_id: &SessionId,
    ) -> Result<ApiResponse<GenerationStatus>> {
        let response = self
            .request(Method::GET, &["v1", "generate", session_id.as_str(), "status"])?
            .send()
            .await?;

        self.handle_envelope(response).await
    }

    /// Wait until a generation job completes
    ///
    /// # Arguments
    /// * `session_id` - The job to wait for
    /// * `config` - Attempt budget; defaults to 60 attempts, 5 seconds apart
    ///
    /// # Returns
    /// The completed status payload, or `JobFailed` / `JobTimeout`
    pub async fn wait_for_generation(
        &self,
        session_id: &SessionId,
        config: Option<PollConfig>,
    ) -> Result<ApiResponse<GenerationStatus>> {
        let poller = poller_for(JobKind::SINGLE, config);
        poller.wait(session_id, &GenerationStatusFetcher::new(self)).await
    }

    /// Like [`wait_for_generation`](Self::wait_for_generation), abandoning the
    /// wait with `Cancelled` once `cancel` fires
    pub async fn wait_for_generation_with_cancel(
        &self,
        session_id: &SessionId,
        config: Option<PollConfig>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<GenerationStatus>> {
        let poller = poller_for(JobKind::SINGLE, config).with_cancellation(cancel.clone());
        poller.wait(session_id, &GenerationStatusFetcher::new(self)).await
    }

    // =============================================================================
    // Bulk Generation
    // =============================================================================

    /// Start generating several publications in one job
    ///
    /// # Arguments
    /// * `req` - Between 1 and 100 generation items
    ///
    /// # Returns
    /// The session ID of the bulk job
    pub async fn generate_bulk(&self, req: BulkGenerateRequest) -> Result<GenerationStarted> {
        if req.items.is_empty() {
            return Err(ClientError::InvalidRequest(
                "bulk generation requires at least one item".into(),
            ));
        }
        if req.items.len() > MAX_BULK_ITEMS {
            return Err(ClientError::InvalidRequest(format!(
                "bulk generation accepts at most {} items, got {}",
                MAX_BULK_ITEMS,
                req.items.len()
            )));
        }
        for item in &req.items {
            validate_generate_request(item)?;
        }

        let response = self
            .request(Method::POST, &["v1", "generate", "bulk"])?
            .json(&req)
            .send()
            .await?;

        let started: GenerationStarted = self.handle_response(response).await?;
        info!(
            "Started bulk generation {} ({} item(s))",
            started.session_id,
            req.items.len()
        );
        Ok(started)
    }

    /// Check the status of a bulk generation job
    ///
    /// Like [`get_generation_status`](Self::get_generation_status), the
    /// envelope is returned without interpreting `success`.
    pub async fn get_bulk_generation_status(
        &self,
        session_id: &SessionId,
    ) -> Result<ApiResponse<BulkGenerationStatus>> {
        let response = self
            .request(
                Method::GET,
                &["v1", "generate", "bulk", session_id.as_str(), "status"],
            )?
            .send()
            .await?;

        self.handle_envelope(response).await
    }

    /// Wait until a bulk generation job completes
    ///
    /// # Arguments
    /// * `session_id` - The bulk job to wait for
    /// * `config` - Attempt budget; defaults to 120 attempts, 10 seconds apart
    pub async fn wait_for_bulk_generation(
        &self,
        session_id: &SessionId,
        config: Option<PollConfig>,
    ) -> Result<ApiResponse<BulkGenerationStatus>> {
        let poller = poller_for(JobKind::BULK, config);
        poller.wait(session_id, &BulkStatusFetcher::new(self)).await
    }

    /// Like [`wait_for_bulk_generation`](Self::wait_for_bulk_generation),
    /// abandoning the wait with `Cancelled` once `cancel` fires
    pub async fn wait_for_bulk_generation_with_cancel(
        &self,
        session_id: &SessionId,
        config: Option<PollConfig>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<BulkGenerationStatus>> {
        let poller = poller_for(JobKind::BULK, config).with_cancellation(cancel.clone());
        poller.wait(session_id, &BulkStatusFetcher::new(self)).await
    }
}

fn poller_for(kind: JobKind, config: Option<PollConfig>) -> Poller {
    match config {
        Some(config) => Poller::new(kind, config),
        None => Poller::for_kind(kind),
    }
}

fn validate_generate_request(req: &GenerateRequest) -> Result<()> {
    if req.topic.trim().is_empty() {
        return Err(ClientError::InvalidRequest("topic cannot be empty".into()));
    }
    if req.word_count == Some(0) {
        return Err(ClientError::InvalidRequest(
            "word_count must be greater than 0".into(),
        ));
    }
    Ok(())
}

/// [`StatusFetcher`] over the single generation status endpoint
pub struct GenerationStatusFetcher<'a> {
    client: &'a QuillClient,
}

impl<'a> GenerationStatusFetcher<'a> {
    pub fn new(client: &'a QuillClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> StatusFetcher for GenerationStatusFetcher<'a> {
    type Data = GenerationStatus;

    async fn fetch(&self, handle: &SessionId) -> Result<ApiResponse<GenerationStatus>> {
        self.client.get_generation_status(handle).await
    }
}

/// [`StatusFetcher`] over the bulk generation status endpoint
pub struct BulkStatusFetcher<'a> {
    client: &'a QuillClient,
}

impl<'a> BulkStatusFetcher<'a> {
    pub fn new(client: &'a QuillClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> StatusFetcher for BulkStatusFetcher<'a> {
    type Data = BulkGenerationStatus;

    async fn fetch(&self, handle: &SessionId) -> Result<ApiResponse<BulkGenerationStatus>> {
        self.client.get_bulk_generation_status(handle).await
    }
}
