//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display system status: record counts, config, data dir.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let users: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let vouched: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_vouched = 1")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let groups: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let skills: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM skills")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let memberships: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_memberships")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let clients: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM api_clients")
        .fetch_one(&state.db_pool.reader)
        .await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "site_url": state.config.site_url,
            "users": { "total": users.0, "vouched": vouched.0 },
            "groups": groups.0,
            "skills": skills.0,
            "group_memberships": memberships.0,
            "api_clients": clients.0,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Commons v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Community ──").dim());
    println!("  Users:    {} ({} vouched)", style(users.0).bold(), style(vouched.0).green());
    println!("  Groups:   {}", style(groups.0).bold());
    println!("  Skills:   {}", style(skills.0).bold());
    println!("  Edges:    {}", memberships.0);
    println!();

    println!("  {}", style("── API ──").dim());
    println!("  Consumers: {}", style(clients.0).bold());
    println!("  Site URL:  {}", style(&state.config.site_url).dim());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
