//! File API endpoints
//!
//! Uploaded files are reference material a generation can draw on (see
//! `GenerateRequest::file_ids`).

use std::path::Path;

use crate::QuillClient;
use crate::error::{ClientError, Result};
use quill_core::domain::file::UploadedFile;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::info;

impl QuillClient {
    /// Upload a file from disk
    ///
    /// # Arguments
    /// * `path` - File to read; its name and extension are sent along
    /// * `purpose` - Optional free-form purpose tag (e.g. "reference")
    ///
    /// # Returns
    /// The stored file
    ///
    /// # Example
    /// ```no_run
    /// # use quill_client::{ClientConfig, QuillClient};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = QuillClient::new(ClientConfig::new("qk_test"))?;
    /// let file = client.upload_file("brief.pdf", Some("reference")).await?;
    /// println!("uploaded {}", file.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        purpose: Option<&str>,
    ) -> Result<UploadedFile> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("invalid file name: {}", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await?;

        self.upload_bytes(&file_name, bytes, purpose).await
    }

    /// Upload in-memory file contents
    ///
    /// # Arguments
    /// * `file_name` - Name reported to the API; the extension selects the MIME type
    /// * `bytes` - File contents
    /// * `purpose` - Optional free-form purpose tag
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        purpose: Option<&str>,
    ) -> Result<UploadedFile> {
        if file_name.trim().is_empty() {
            return Err(ClientError::InvalidRequest("file name cannot be empty".into()));
        }

        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(&mime_for(file_name))?;

        let mut form = Form::new().part("file", part);
        if let Some(purpose) = purpose {
            form = form.text("purpose", purpose.to_string());
        }

        let response = self
            .request(Method::POST, &["v1", "files"])?
            .multipart(form)
            .send()
            .await?;

        let file: UploadedFile = self.handle_response(response).await?;
        info!("Uploaded {} ({} bytes) as {}", file_name, size, file.id);
        Ok(file)
    }

    /// List uploaded files
    pub async fn list_files(&self) -> Result<Vec<UploadedFile>> {
        let response = self.request(Method::GET, &["v1", "files"])?.send().await?;

        self.handle_response(response).await
    }

    /// Delete an uploaded file
    ///
    /// # Arguments
    /// * `file_id` - The file ID to delete
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &["v1", "files", file_id])?
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

/// MIME type sent for a file, guessed from its extension
fn mime_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}
