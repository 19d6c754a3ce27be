//! Directory listing commands: groups and skills in a colored table.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use commons_core::repository::{DirectoryOrder, SortOrder};
use commons_core::service::directory::DirectoryQuery;
use commons_types::directory::DirectoryPage;

use crate::state::AppState;

fn parse_query(order_by: &str, order: &str) -> Result<DirectoryQuery> {
    let order_by = order_by
        .parse::<DirectoryOrder>()
        .map_err(|e| anyhow::anyhow!(e))?;
    let order = match order.to_lowercase().as_str() {
        "desc" => SortOrder::Desc,
        _ => SortOrder::Asc,
    };
    Ok(DirectoryQuery {
        order_by,
        order,
        page: 1,
        page_size: None,
    })
}

/// List groups with live member counts.
pub async fn list_groups(state: &AppState, order_by: &str, order: &str, json: bool) -> Result<()> {
    let page = state
        .directory_service
        .list_groups(parse_query(order_by, order)?)
        .await?;
    render(page, "group", true, json)
}

/// List skills with live vouched member counts.
pub async fn list_skills(state: &AppState, order_by: &str, order: &str, json: bool) -> Result<()> {
    let page = state
        .directory_service
        .list_skills(parse_query(order_by, order)?)
        .await?;
    render(page, "skill", false, json)
}

fn render(page: DirectoryPage, noun: &str, with_url: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&page.entries)?);
        return Ok(());
    }

    if page.entries.is_empty() {
        println!();
        println!(
            "  {} No {noun}s with members yet.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Members").fg(Color::White),
    ];
    if with_url {
        header.push(Cell::new("URL").fg(Color::White));
    }
    table.set_header(header);

    for entry in &page.entries {
        let mut row = vec![
            Cell::new(&entry.name).fg(Color::Cyan),
            Cell::new(entry.number_of_members),
        ];
        if with_url {
            row.push(Cell::new(entry.url.as_deref().unwrap_or("-")).fg(Color::DarkGrey));
        }
        table.add_row(row);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} {noun}{} ({} total)",
        style(page.entries.len()).bold(),
        if page.entries.len() == 1 { "" } else { "s" },
        page.total_count
    );
    println!();

    Ok(())
}
