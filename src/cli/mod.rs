//! CLI argument parsing for playbook.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.
//!
//! Required positional values (`switch <agent>`, `speckit start <feature>
//! <agent>`) are declared optional here and checked by the commands, so a
//! missing value is a usage error with exit code 1 rather than a clap error.

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Examples:
  playbook                             Install agents and pick one to activate
  playbook switch backend              Activate the Backend Engineer
  playbook be                          Same, using an alias
  playbook speckit start \"Add SSO\" be  Start a feature workflow

Run `playbook list` to see every agent and alias.";

/// Playbook: install and switch Engineering Delivery Playbook agents.
///
/// Agents are markdown prompt files. Switching copies one agent's content
/// into CLAUDE.md and .cursorrules in the current directory.
#[derive(Parser, Debug)]
#[command(name = "playbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, after_help = AFTER_HELP)]
pub struct Cli {
    /// Read the bundled agents tree from DIR instead of the packaged copy.
    #[arg(long, global = true, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Diagnostic log filter written to stderr (e.g. "info", "debug").
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to run. Defaults to `install`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for playbook.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy the bundled agents into ./agents/ and optionally activate one.
    ///
    /// Existing files are overwritten; files you added are kept.
    Install(InstallArgs),

    /// Activate an agent by key or alias.
    ///
    /// Overwrites CLAUDE.md and .cursorrules with the agent's markdown.
    Switch(SwitchArgs),

    /// List available agents and their aliases.
    List(ListArgs),

    /// Feature workflow scaffold under .specify/.
    Speckit(SpeckitCommand),

    // Bare agent key or alias, e.g. `playbook be`.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Arguments for the `install` command.
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Activate this agent after installing instead of prompting.
    #[arg(short, long, value_name = "AGENT")]
    pub agent: Option<String>,

    /// Install only; do not prompt for an agent.
    #[arg(long, conflicts_with = "agent")]
    pub no_switch: bool,
}

/// Arguments for the `switch` command.
#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Agent key or alias (e.g. backend, be).
    pub agent: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the agent table as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Speckit subcommands.
#[derive(Args, Debug)]
pub struct SpeckitCommand {
    #[command(subcommand)]
    pub action: Option<SpeckitAction>,
}

/// Available speckit actions.
#[derive(Subcommand, Debug)]
pub enum SpeckitAction {
    /// Create the .specify/ directory tree.
    ///
    /// Does nothing if .specify/ already exists.
    Init,

    /// Show the scaffold, the recorded feature and the active agent.
    Status,

    /// Start a feature: activate an agent and write .specify/prompt.md.
    Start(StartArgs),
}

/// Arguments for the `speckit start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Short description of the feature.
    pub feature: Option<String>,

    /// Agent key or alias to activate.
    pub agent: Option<String>,
}

impl Cli {
    /// Parse process arguments.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

/// Print the top-level help text to stdout.
pub fn print_help() {
    let _ = Cli::command().print_long_help();
}

/// Print the `speckit` help text to stdout.
pub fn print_speckit_help() {
    let mut cmd = Cli::command();
    if let Some(speckit) = cmd.find_subcommand_mut("speckit") {
        let _ = speckit.print_long_help();
    }
}
