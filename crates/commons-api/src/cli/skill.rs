//! Skill provisioning command.

use anyhow::Result;
use console::style;

use commons_core::repository::skill::SkillRepository;
use commons_types::skill::Skill;

use crate::state::AppState;

/// Create a skill.
pub async fn create_skill(state: &AppState, name: &str, json: bool) -> Result<()> {
    let skill = Skill::new(name);

    let created = state
        .skill_repo
        .create(&skill)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!();
    println!("  {} Skill created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&created.name).cyan());
    println!("  {}  {}", style("Slug:").bold(), &created.url);
    println!("  {}  {}", style("ID:").bold(), style(created.id.to_string()).dim());
    println!();

    Ok(())
}
