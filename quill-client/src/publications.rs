//! Publication and template API endpoints

use crate::QuillClient;
use crate::error::{ClientError, Result};
use quill_core::domain::publication::{Publication, Template};
use quill_core::dto::publication::{ListPublicationsQuery, UpdatePublication};
use quill_core::dto::response::Page;
use reqwest::Method;

impl QuillClient {
    // =============================================================================
    // Publication Management
    // =============================================================================

    /// List publications
    ///
    /// # Arguments
    /// * `query` - Paging and filters; unset fields are omitted from the query string
    ///
    /// # Returns
    /// One page of publications
    ///
    /// # Example
    /// ```no_run
    /// # use quill_client::{ClientConfig, QuillClient};
    /// # use quill_core::domain::publication::PublicationStatus;
    /// # use quill_core::dto::publication::ListPublicationsQuery;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = QuillClient::new(ClientConfig::new("qk_test"))?;
    /// let page = client
    ///     .list_publications(&ListPublicationsQuery {
    ///         status: Some(PublicationStatus::Draft),
    ///         limit: Some(20),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// println!("{} of {} drafts", page.items.len(), page.total);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_publications(&self, query: &ListPublicationsQuery) -> Result<Page<Publication>> {
        let response = self
            .request(Method::GET, &["v1", "publications"])?
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a publication by ID
    ///
    /// # Arguments
    /// * `publication_id` - The publication ID
    ///
    /// # Returns
    /// The publication including its content
    pub async fn get_publication(&self, publication_id: &str) -> Result<Publication> {
        let response = self
            .request(Method::GET, &["v1", "publications", publication_id])?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Update a publication
    ///
    /// # Arguments
    /// * `publication_id` - The publication ID
    /// * `update` - Fields to change; must set at least one
    ///
    /// # Returns
    /// The updated publication
    pub async fn update_publication(
        &self,
        publication_id: &str,
        update: &UpdatePublication,
    ) -> Result<Publication> {
        if update.is_empty() {
            return Err(ClientError::InvalidRequest(
                "update must change at least one field".into(),
            ));
        }

        let response = self
            .request(Method::PATCH, &["v1", "publications", publication_id])?
            .json(update)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a publication
    ///
    /// # Arguments
    /// * `publication_id` - The publication ID to delete
    pub async fn delete_publication(&self, publication_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &["v1", "publications", publication_id])?
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Templates
    // =============================================================================

    /// List the generation templates available to the account
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let response = self.request(Method::GET, &["v1", "templates"])?.send().await?;

        self.handle_response(response).await
    }
}
