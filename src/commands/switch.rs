//! Implementation of the `playbook switch` command.
//!
//! Switching replaces the entire content of every configuration target with
//! the chosen agent's markdown. The targets themselves are the only record
//! of which agent is active; [`active_agent`] recovers it by content.

use crate::context::Workspace;
use crate::error::{PlaybookError, Result};
use crate::fs::atomic_write_file;
use crate::registry::{self, AGENTS, Agent};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Files written by a successful switch.
#[derive(Debug, Clone)]
pub struct SwitchOutcome {
    pub agent: &'static Agent,
    pub written: Vec<PathBuf>,
}

/// Resolve a key or alias, failing with the list of valid keys.
pub fn resolve_agent(key: &str) -> Result<&'static Agent> {
    registry::resolve(key).ok_or_else(|| PlaybookError::UnknownAgent {
        key: key.to_string(),
        available: registry::available_keys(),
    })
}

/// Read an agent's markdown from the installed tree.
pub fn load_agent_content(ws: &Workspace, agent: &Agent) -> Result<String> {
    let path = ws.agent_path(agent);
    std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            PlaybookError::AgentNotInstalled {
                agent: agent.name.to_string(),
                path: path.clone(),
            }
        } else {
            PlaybookError::io(format!("failed to read '{}'", path.display()), e)
        }
    })
}

/// Overwrite every configuration target with `content`.
pub fn write_targets(ws: &Workspace, content: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(ws.config_targets.len());
    for target in &ws.config_targets {
        atomic_write_file(target, content)?;
        tracing::debug!(target = %target.display(), bytes = content.len(), "wrote config target");
        written.push(target.clone());
    }
    Ok(written)
}

/// Make `agent` the active agent.
///
/// Nothing is written unless the agent's file could be read.
pub fn switch_agent(ws: &Workspace, agent: &'static Agent) -> Result<SwitchOutcome> {
    let content = load_agent_content(ws, agent)?;
    let written = write_targets(ws, &content)?;
    Ok(SwitchOutcome { agent, written })
}

/// Identify the active agent by comparing the first configuration target
/// with each installed agent file.
///
/// Returns `None` when the target is missing or matches no installed agent
/// (e.g. it was edited by hand).
pub fn active_agent(ws: &Workspace) -> Result<Option<&'static Agent>> {
    let Some(target) = ws.config_targets.first() else {
        return Ok(None);
    };

    let current = match std::fs::read(target) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PlaybookError::io(
                format!("failed to read '{}'", target.display()),
                e,
            ));
        }
    };

    for agent in AGENTS {
        match std::fs::read(ws.agent_path(agent)) {
            Ok(bytes) if bytes == current => return Ok(Some(agent)),
            _ => {}
        }
    }
    Ok(None)
}

/// Execute the `playbook switch` command.
pub fn cmd_switch(ws: &Workspace, key: Option<&str>) -> Result<()> {
    let key = key.map(str::trim).filter(|k| !k.is_empty()).ok_or_else(|| {
        PlaybookError::Usage(format!(
            "missing agent.\n\n\
             Usage: playbook switch <agent>\n\
             Available agents: {}\n\n\
             Run `playbook list` to see aliases.",
            registry::available_keys()
        ))
    })?;

    let agent = resolve_agent(key)?;
    let outcome = switch_agent(ws, agent)?;
    print_switched(ws, &outcome);
    Ok(())
}

pub(crate) fn print_switched(ws: &Workspace, outcome: &SwitchOutcome) {
    println!(
        "  Switched to {} ({})",
        outcome.agent.name, outcome.agent.key
    );
    for path in &outcome.written {
        println!("    updated {}", ws.display_path(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_installed_workspace, create_test_workspace, read};

    #[test]
    fn test_switch_writes_identical_content_to_all_targets() {
        let (_temp, ws) = create_installed_workspace();

        for agent in AGENTS {
            let keys = std::iter::once(agent.key).chain(registry::aliases_for(agent.key));
            for key in keys {
                let resolved = resolve_agent(key).unwrap();
                let outcome = switch_agent(&ws, resolved).unwrap();

                let expected = read(&ws.agent_path(agent));
                assert_eq!(outcome.written, ws.config_targets);
                for target in &ws.config_targets {
                    assert_eq!(read(target), expected, "{} via '{}'", target.display(), key);
                }
            }
        }
    }

    #[test]
    fn test_unknown_key_leaves_targets_untouched() {
        let (_temp, ws) = create_installed_workspace();
        for target in &ws.config_targets {
            std::fs::write(target, "hand-written rules").unwrap();
        }

        let err = cmd_switch(&ws, Some("qa-lead")).unwrap_err();

        assert!(matches!(err, PlaybookError::UnknownAgent { .. }));
        assert_eq!(err.exit_code(), 1);
        for target in &ws.config_targets {
            assert_eq!(read(target), "hand-written rules");
        }
    }

    #[test]
    fn test_missing_key_is_usage_error() {
        let (_temp, ws) = create_installed_workspace();

        for key in [None, Some(""), Some("   ")] {
            let err = cmd_switch(&ws, key).unwrap_err();
            assert!(matches!(err, PlaybookError::Usage(_)));
            assert!(err.to_string().contains("playbook switch <agent>"));
        }
    }

    #[test]
    fn test_switch_before_install_says_install_first() {
        let (_temp, ws) = create_test_workspace();

        let err = cmd_switch(&ws, Some("backend")).unwrap_err();

        assert!(matches!(err, PlaybookError::AgentNotInstalled { .. }));
        assert!(err.to_string().contains("playbook install"));
        for target in &ws.config_targets {
            assert!(!target.exists());
        }
    }

    #[test]
    fn test_active_agent_tracks_last_switch() {
        let (_temp, ws) = create_installed_workspace();
        assert_eq!(active_agent(&ws).unwrap(), None);

        cmd_switch(&ws, Some("fe")).unwrap();
        assert_eq!(active_agent(&ws).unwrap().unwrap().key, "frontend");

        cmd_switch(&ws, Some("ops")).unwrap();
        assert_eq!(active_agent(&ws).unwrap().unwrap().key, "devops");

        std::fs::write(&ws.config_targets[0], "edited").unwrap();
        assert_eq!(active_agent(&ws).unwrap(), None);
    }
}
