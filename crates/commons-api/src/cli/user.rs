//! User provisioning command.
//!
//! Accounts come from an external identity provider; this only records the
//! attributes the membership subsystem gates on.

use anyhow::Result;
use chrono::Utc;
use console::style;

use commons_core::repository::user::UserRepository;
use commons_types::user::{User, UserId};

use crate::state::AppState;

/// Create a user record.
pub async fn create_user(
    state: &AppState,
    username: &str,
    vouched: bool,
    superuser: bool,
    json: bool,
) -> Result<()> {
    let user = User {
        id: UserId::new(),
        username: username.to_string(),
        is_vouched: vouched,
        is_superuser: superuser,
        created_at: Utc::now(),
    };

    let created = state
        .user_repo
        .create(&user)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!();
    println!("  {} User created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Username:").bold(), style(&created.username).cyan());
    println!("  {}  {}", style("ID:").bold(), style(created.id.to_string()).dim());
    println!(
        "  {}  {}",
        style("Vouched:").bold(),
        if created.is_vouched {
            style("yes").green()
        } else {
            style("no").yellow()
        }
    );
    if created.is_superuser {
        println!("  {}  {}", style("Role:").bold(), style("superuser").red());
    }
    println!();

    Ok(())
}
