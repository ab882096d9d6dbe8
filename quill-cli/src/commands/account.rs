//! Account command handler

use anyhow::Result;
use colored::*;
use quill_client::QuillClient;

/// Show account plan and credit usage
pub async fn show_account(client: &QuillClient) -> Result<()> {
    let account = client.get_account().await?;

    let credits = if account.credits_remaining > 0 {
        account.credits_remaining.to_string().green()
    } else {
        account.credits_remaining.to_string().red()
    };

    println!("{}", "Account:".bold());
    println!("  ID:      {}", account.id);
    println!("  Email:   {}", account.email);
    println!("  Plan:    {}", account.plan.cyan());
    println!("  Credits: {} remaining, {} used", credits, account.credits_used);

    Ok(())
}
