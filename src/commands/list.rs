//! Implementation of the `playbook list` command.

use crate::cli::ListArgs;
use crate::context::Workspace;
use crate::error::{PlaybookError, Result};
use crate::registry::{AGENTS, Agent, aliases_for};
use serde::Serialize;

/// One row of the agent table.
#[derive(Debug, Serialize)]
pub struct AgentListing {
    #[serde(flatten)]
    pub agent: &'static Agent,
    pub aliases: Vec<&'static str>,
    pub installed: bool,
}

/// Build the table in registry order.
pub fn agent_listings(ws: &Workspace) -> Vec<AgentListing> {
    AGENTS
        .iter()
        .map(|agent| AgentListing {
            agent,
            aliases: aliases_for(agent.key),
            installed: ws.agent_path(agent).is_file(),
        })
        .collect()
}

/// Execute the `playbook list` command.
pub fn cmd_list(ws: &Workspace, args: &ListArgs) -> Result<()> {
    let listings = agent_listings(ws);

    if args.json {
        let json = serde_json::to_string_pretty(&listings).map_err(|e| {
            PlaybookError::Usage(format!("failed to serialize agent list: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    println!("  Available agents:");
    println!();
    println!(
        "  {:<18} {:<20} {:<20} {}",
        "KEY", "NAME", "ALIASES", "DESCRIPTION"
    );
    for listing in &listings {
        let marker = if listing.installed { "" } else { " (not installed)" };
        println!(
            "  {:<18} {:<20} {:<20} {}{}",
            listing.agent.key,
            listing.agent.name,
            listing.aliases.join(", "),
            listing.agent.description,
            marker
        );
    }
    println!();
    println!("  Usage: playbook switch <agent>   or   playbook <agent>");
    println!();

    Ok(())
}
