use crate::config::Config;
use crate::context::{Workspace, bundled_source_dir};
use crate::fs::copy_tree;
use std::path::Path;
use tempfile::TempDir;

/// Empty workspace in a fresh temp dir, reading from the bundled agents tree.
pub(crate) fn create_test_workspace() -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().unwrap();
    let ws = Workspace::from_config(temp_dir.path(), &Config::default(), None);
    (temp_dir, ws)
}

/// Workspace with the bundled agents tree already installed.
pub(crate) fn create_installed_workspace() -> (TempDir, Workspace) {
    let (temp_dir, ws) = create_test_workspace();
    copy_tree(bundled_source_dir(), &ws.agents_dir).unwrap();
    (temp_dir, ws)
}

/// Small stand-in agents tree, for tests that must not depend on bundled content.
pub(crate) fn write_fake_source(root: &Path) {
    std::fs::create_dir_all(root.join("knowledge")).unwrap();
    for agent in crate::registry::AGENTS {
        std::fs::write(root.join(agent.file), format!("# {}\n", agent.name)).unwrap();
    }
    std::fs::write(root.join("knowledge").join("testing.md"), "# Testing\n").unwrap();
}

pub(crate) fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}
