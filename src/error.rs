//! Error types for the playbook CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for playbook operations.
///
/// Every failure is terminal for the invocation; `main` prints the message
/// and exits with [`PlaybookError::exit_code`].
#[derive(Error, Debug)]
pub enum PlaybookError {
    /// The bundled agents tree could not be found.
    #[error("agents directory not found in package (looked in '{}')", .0.display())]
    SourceMissing(PathBuf),

    /// The agent is registered but its markdown file is not installed.
    #[error(
        "agent file '{}' not found for {agent}.\n\nRun `playbook install` first.",
        .path.display()
    )]
    AgentNotInstalled { agent: String, path: PathBuf },

    /// The key matched neither an agent nor an alias.
    #[error("unknown agent '{key}'.\n\nAvailable agents: {available}")]
    UnknownAgent { key: String, available: String },

    /// A required argument was missing or malformed.
    #[error("{0}")]
    Usage(String),

    /// The config file was unreadable or held invalid values.
    #[error("{0}")]
    Config(String),

    /// Rendering the status file template failed.
    #[error("template error: {0}")]
    Template(#[from] crate::scaffold::TemplateError),

    /// Any other filesystem failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PlaybookError {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PlaybookError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlaybookError::SourceMissing(_)
            | PlaybookError::AgentNotInstalled { .. }
            | PlaybookError::UnknownAgent { .. }
            | PlaybookError::Usage(_)
            | PlaybookError::Config(_)
            | PlaybookError::Template(_)
            | PlaybookError::Io { .. } => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for playbook operations.
pub type Result<T> = std::result::Result<T, PlaybookError>;
