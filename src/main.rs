//! Playbook: installer and switcher for Engineering Delivery Playbook agents.
//!
//! This is the main entry point for the `playbook` CLI. It parses arguments,
//! sets up diagnostic logging, dispatches to the appropriate command handler,
//! and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod registry;
pub mod scaffold;
pub mod selector;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            // Help, whether asked for or shown for bad input, is not a failure.
            commands::handle_parse_error(err);
            return ExitCode::from(exit_codes::SUCCESS as u8);
        }
    };

    if let Err(err) = logging::init_logging(&cli.log_level) {
        eprintln!("Error: {}", err);
        return ExitCode::from(err.exit_code() as u8);
    }

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
