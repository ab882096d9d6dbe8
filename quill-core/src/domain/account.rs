//! Account domain types

use serde::{Deserialize, Serialize};

/// The account owning the API key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub plan: String,
    /// Generation credits left in the current billing period
    pub credits_remaining: i64,
    #[serde(default)]
    pub credits_used: i64,
}
