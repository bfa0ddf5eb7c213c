//! CLI command implementations

use anyhow::Result;
use boxdeck_config::GlobalConfig;
use boxdeck_core::{Inventory, Session};
use std::path::Path;

/// Print sessions as a table
pub async fn list(inventory: &Inventory, all: bool) -> Result<()> {
    let mut sessions = if all {
        inventory.all().await?
    } else {
        inventory.snapshot().await?
    };

    if sessions.is_empty() {
        if all {
            println!("No containers found.");
        } else {
            println!("No distrobox sessions found.");
            println!("\nUse 'distrobox create' to make one.");
        }
        return Ok(());
    }

    sessions.sort_by(|a, b| a.name().cmp(b.name()));
    print!("{}", format_table(&sessions));
    Ok(())
}

/// Render sessions with each column padded to its widest value
pub fn format_table(sessions: &[Session]) -> String {
    let width = |title: &str, field: fn(&Session) -> &str| {
        sessions
            .iter()
            .map(|s| field(s).chars().count())
            .chain(std::iter::once(title.len()))
            .max()
            .unwrap_or(0)
    };
    let id_w = width("ID", Session::id);
    let name_w = width("NAME", Session::name);
    let status_w = width("STATUS", Session::status);

    let mut out = format!(
        "{:<id_w$}  {:<name_w$}  {:<status_w$}  IMAGE\n",
        "ID", "NAME", "STATUS"
    );
    for s in sessions {
        out.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {:<status_w$}  {}\n",
            s.id(),
            s.name(),
            s.status(),
            s.image()
        ));
    }
    out
}

/// Show the effective configuration
pub fn config(config: &GlobalConfig, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) if p.exists() => println!("# Config file: {}\n", p.display()),
        Some(p) => println!("# Config file: {} (not created yet, showing defaults)\n", p.display()),
        None => println!("# No config directory found, showing defaults\n"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
