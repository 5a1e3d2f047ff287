//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional per-project configuration.
///
/// This struct represents the contents of `playbook.yaml` in the working
/// directory. Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the bundled agents tree is installed into (default: "agents").
    pub agents_dir: PathBuf,

    /// Files overwritten with the active agent's content.
    pub config_targets: Vec<PathBuf>,

    /// Root of the workflow scaffold (default: ".specify").
    pub specify_dir: PathBuf,

    /// Location of the bundled agents tree. When unset, the tree shipped
    /// with the binary is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents_dir: PathBuf::from(DEFAULT_AGENTS_DIR),
            config_targets: DEFAULT_CONFIG_TARGETS.iter().map(PathBuf::from).collect(),
            specify_dir: PathBuf::from(DEFAULT_SPECIFY_DIR),
            source_dir: None,
        }
    }
}

/// Default install target, relative to the working directory.
const DEFAULT_AGENTS_DIR: &str = "agents";

/// Files read by Claude Code and Cursor respectively.
const DEFAULT_CONFIG_TARGETS: &[&str] = &["CLAUDE.md", ".cursorrules"];

/// Default workflow scaffold root.
const DEFAULT_SPECIFY_DIR: &str = ".specify";
