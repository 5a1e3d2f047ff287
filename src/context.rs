//! Workspace path resolution for playbook.
//!
//! Every command reads and writes relative to a single workspace root (the
//! working directory). This module applies the optional `playbook.yaml` and
//! the `--source` override and hands commands absolute paths for:
//!
//! - the bundled agents tree (read-only source)
//! - the installed agents tree (`./agents/`)
//! - the configuration targets (`./CLAUDE.md`, `./.cursorrules`)
//! - the workflow scaffold (`./.specify/`)

use crate::config::{CONFIG_FILE, Config};
use crate::error::{PlaybookError, Result};
use crate::registry::Agent;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the bundled agents directory, both in the package and when installed.
pub const BUNDLED_AGENTS_DIR: &str = "agents";

/// Status file written by `speckit start`, relative to the scaffold root.
pub const PROMPT_FILE: &str = "prompt.md";

/// Resolved paths for one invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// The working directory commands operate in.
    pub root: PathBuf,

    /// Bundled agents tree that `install` copies from.
    pub source_dir: PathBuf,

    /// Installed agents tree that `switch` reads from.
    pub agents_dir: PathBuf,

    /// Files overwritten on every switch.
    pub config_targets: Vec<PathBuf>,

    /// Workflow scaffold root.
    pub specify_dir: PathBuf,
}

impl Workspace {
    /// Resolve the workspace from the current working directory.
    pub fn resolve(source_override: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir()
            .map_err(|e| PlaybookError::io("failed to get current working directory", e))?;

        Self::resolve_from(&cwd, source_override)
    }

    /// Resolve the workspace rooted at `root`, loading `playbook.yaml` if present.
    pub fn resolve_from<P: AsRef<Path>>(root: P, source_override: Option<&Path>) -> Result<Self> {
        let root = root.as_ref();
        let config = Config::load_or_default(root.join(CONFIG_FILE))?;
        Ok(Self::from_config(root, &config, source_override))
    }

    /// Build the workspace from an already-loaded config.
    ///
    /// Relative paths are taken relative to `root`. `source_override` wins
    /// over `config.source_dir`, which wins over the bundled tree.
    pub fn from_config(root: &Path, config: &Config, source_override: Option<&Path>) -> Self {
        let source_dir = match source_override.or(config.source_dir.as_deref()) {
            Some(dir) => root.join(dir),
            None => bundled_source_dir(),
        };

        Self {
            root: root.to_path_buf(),
            source_dir,
            agents_dir: root.join(&config.agents_dir),
            config_targets: config
                .config_targets
                .iter()
                .map(|target| root.join(target))
                .collect(),
            specify_dir: root.join(&config.specify_dir),
        }
    }

    /// Path to an agent's markdown file in the installed tree.
    pub fn agent_path(&self, agent: &Agent) -> PathBuf {
        self.agents_dir.join(agent.file)
    }

    /// Path to the scaffold status file.
    pub fn prompt_path(&self) -> PathBuf {
        self.specify_dir.join(PROMPT_FILE)
    }

    /// Fail with [`PlaybookError::SourceMissing`] unless the bundled tree is a directory.
    pub fn ensure_source_exists(&self) -> Result<()> {
        if self.source_dir.is_dir() {
            Ok(())
        } else {
            Err(PlaybookError::SourceMissing(self.source_dir.clone()))
        }
    }

    /// Render `path` relative to the workspace root for user-facing output.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }
}

/// Locate the agents tree shipped with the binary.
///
/// An `agents/` directory next to the executable takes precedence (packaged
/// installs); otherwise the tree in the crate sources is used.
pub fn bundled_source_dir() -> PathBuf {
    let beside_exe = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLED_AGENTS_DIR)));

    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => Path::new(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_AGENTS_DIR),
    }
}
