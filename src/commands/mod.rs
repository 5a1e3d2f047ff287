//! Command implementations for playbook.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. No command at all means `install`; an unrecognized
//! first argument is tried as an agent key before falling back to help.

mod install;
mod list;
mod speckit;
mod switch;

use crate::cli::{Cli, Command, InstallArgs, print_help};
use crate::context::Workspace;
use crate::error::Result;
use crate::registry::{self, Agent};
use clap::error::ErrorKind;
use std::io;

/// Dispatch a parsed command line to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let Cli { source, command, .. } = cli;

    // Unrecognized input shows help before the workspace config is read.
    let quick = match &command {
        Some(Command::External(tokens)) => match quick_switch_target(tokens) {
            Some(agent) => Some(agent),
            None => {
                tracing::debug!(?tokens, "unrecognized command; showing help");
                print_help();
                return Ok(());
            }
        },
        _ => None,
    };

    let ws = Workspace::resolve(source.as_deref())?;
    tracing::debug!(root = %ws.root.display(), source = %ws.source_dir.display(), "resolved workspace");

    match command {
        None => run_install(&ws, &InstallArgs::default()),
        Some(Command::Install(args)) => run_install(&ws, &args),
        Some(Command::Switch(args)) => switch::cmd_switch(&ws, args.agent.as_deref()),
        Some(Command::List(args)) => list::cmd_list(&ws, &args),
        Some(Command::Speckit(cmd)) => speckit::dispatch_speckit(&ws, cmd),
        Some(Command::External(_)) => quick.map_or(Ok(()), |agent| quick_switch(&ws, agent)),
    }
}

fn run_install(ws: &Workspace, args: &InstallArgs) -> Result<()> {
    let stdin = io::stdin();
    install::cmd_install(ws, args, &mut stdin.lock(), &mut io::stdout())
}

/// The agent named by `playbook <agent> ...`, if the first token is one.
fn quick_switch_target(tokens: &[String]) -> Option<&'static Agent> {
    let agent = registry::resolve(tokens.first()?)?;
    if tokens.len() > 1 {
        tracing::debug!(extra = ?&tokens[1..], "ignoring arguments after agent key");
    }
    Some(agent)
}

/// `playbook <agent>`: same as `playbook switch <agent>`.
fn quick_switch(ws: &Workspace, agent: &'static Agent) -> Result<()> {
    let outcome = switch::switch_agent(ws, agent)?;
    switch::print_switched(ws, &outcome);
    Ok(())
}

/// Handle a clap parse failure.
///
/// Requested help and version text is printed as clap renders it; any
/// other parse failure shows the top-level help. Both count as success.
pub fn handle_parse_error(err: clap::Error) {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
        }
        _ => print_help(),
    }
}
