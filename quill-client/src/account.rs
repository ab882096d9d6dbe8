//! Account API endpoints

use crate::QuillClient;
use crate::error::Result;
use quill_core::domain::account::Account;
use reqwest::Method;

impl QuillClient {
    /// Get the account owning the API key
    ///
    /// # Returns
    /// Plan and remaining generation credits
    pub async fn get_account(&self) -> Result<Account> {
        let response = self.request(Method::GET, &["v1", "account"])?.send().await?;

        self.handle_response(response).await
    }
}
