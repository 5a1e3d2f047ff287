//! Implementation of the `playbook speckit` commands.
//!
//! - `speckit init` - create the `.specify/` tree (no-op if it exists)
//! - `speckit status` - report the scaffold, status file and active agent
//! - `speckit start <feature> <agent>` - activate an agent and write the
//!   status file
//! - `speckit help` - usage

use super::switch::{active_agent, load_agent_content, resolve_agent, write_targets};
use crate::cli::{SpeckitAction, SpeckitCommand, StartArgs, print_speckit_help};
use crate::context::Workspace;
use crate::error::{PlaybookError, Result};
use crate::fs::atomic_write_file;
use crate::registry;
use crate::scaffold::{
    InitOutcome, SCAFFOLD_DIRS, ScaffoldState, ensure_scaffold_dirs, init_scaffold, render_status,
    single_line,
};

/// Dispatch speckit subcommands.
pub fn dispatch_speckit(ws: &Workspace, cmd: SpeckitCommand) -> Result<()> {
    match cmd.action {
        Some(SpeckitAction::Init) => cmd_init(ws),
        Some(SpeckitAction::Status) => cmd_status(ws),
        Some(SpeckitAction::Start(args)) => cmd_start(ws, &args),
        None => {
            print_speckit_help();
            Ok(())
        }
    }
}

/// Execute `playbook speckit init`.
pub fn cmd_init(ws: &Workspace) -> Result<()> {
    let root = ws.display_path(&ws.specify_dir);

    match init_scaffold(ws)? {
        InitOutcome::AlreadyExists => {
            println!("  {}/ already exists; nothing to do.", root);
            println!();
            print_state(ws, &ScaffoldState::inspect(ws)?);
        }
        InitOutcome::Created => {
            println!("  Initialized speckit workflow in {}/", root);
            println!();
            println!("  Created directories:");
            for dir in SCAFFOLD_DIRS {
                println!("    {}/{}/", root, dir);
            }
            println!();
            println!("  Next: playbook speckit start \"<feature>\" <agent>");
        }
    }

    Ok(())
}

/// Execute `playbook speckit status`.
pub fn cmd_status(ws: &Workspace) -> Result<()> {
    let state = ScaffoldState::inspect(ws)?;
    if !state.exists {
        println!(
            "  No speckit workflow found ({}/ is missing).",
            ws.display_path(&ws.specify_dir)
        );
        println!("  Run `playbook speckit init` to create one.");
    } else {
        print_state(ws, &state);
    }

    println!();
    match active_agent(ws)? {
        Some(agent) => println!("  Active agent: {} ({})", agent.name, agent.key),
        None => println!("  Active agent: none detected"),
    }

    Ok(())
}

fn print_state(ws: &Workspace, state: &ScaffoldState) {
    let root = ws.display_path(&ws.specify_dir);
    println!("  Speckit workflow: {}/", root);
    for dir in &state.present {
        println!("    [x] {}/", dir);
    }
    for dir in &state.missing {
        println!("    [ ] {}/ (missing)", dir);
    }

    println!();
    match &state.status {
        Some(status) => {
            let unknown = "(not recorded)";
            println!("  Feature:  {}", status.feature.as_deref().unwrap_or(unknown));
            println!("  Agent:    {}", status.agent.as_deref().unwrap_or(unknown));
            println!("  Progress: {}/{} checklist items", status.done, status.total);
        }
        None => println!("  No feature started. Run `playbook speckit start \"<feature>\" <agent>`."),
    }
}

/// Execute `playbook speckit start <feature> <agent>`.
///
/// The agent is resolved and its file read before anything is written.
pub fn cmd_start(ws: &Workspace, args: &StartArgs) -> Result<()> {
    let feature = args.feature.as_deref().map(single_line).filter(|f| !f.is_empty());
    let key = args.agent.as_deref().map(str::trim).filter(|k| !k.is_empty());

    let (Some(feature), Some(key)) = (feature, key) else {
        return Err(PlaybookError::Usage(format!(
            "missing feature or agent.\n\n\
             Usage: playbook speckit start \"<feature>\" <agent>\n\
             Available agents: {}",
            registry::available_keys()
        )));
    };

    let agent = resolve_agent(key)?;
    let content = load_agent_content(ws, agent)?;

    ensure_scaffold_dirs(ws)?;
    let written = write_targets(ws, &content)?;

    let prompt_path = ws.prompt_path();
    atomic_write_file(&prompt_path, &render_status(&feature, agent.name)?)?;
    tracing::debug!(
        path = %prompt_path.display(),
        feature = %feature,
        agent = agent.key,
        "wrote status file"
    );

    println!("  Started feature: {}", feature);
    println!("  Agent:           {} ({})", agent.name, agent.key);
    println!();
    println!("  Wrote:");
    for path in written.iter().chain(std::iter::once(&prompt_path)) {
        println!("    {}", ws.display_path(path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_installed_workspace, create_test_workspace, read};

    fn start_args(feature: Option<&str>, agent: Option<&str>) -> StartArgs {
        StartArgs {
            feature: feature.map(str::to_string),
            agent: agent.map(str::to_string),
        }
    }

    #[test]
    fn test_init_then_init_again() {
        let (_temp, ws) = create_test_workspace();

        cmd_init(&ws).unwrap();
        let marker = ws.specify_dir.join("memory").join("context.md");
        std::fs::write(&marker, "kept").unwrap();
        cmd_init(&ws).unwrap();

        assert_eq!(read(&marker), "kept");
        for dir in SCAFFOLD_DIRS {
            assert!(ws.specify_dir.join(dir).is_dir());
        }
    }

    #[test]
    fn test_start_writes_status_and_switches() {
        let (_temp, ws) = create_installed_workspace();

        cmd_start(&ws, &start_args(Some("X"), Some("be"))).unwrap();

        let prompt = read(&ws.prompt_path());
        assert!(prompt.contains("X"));
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("- [x] Initialize workflow"));

        let backend = read(&ws.agents_dir.join("backend.md"));
        for target in &ws.config_targets {
            assert_eq!(read(target), backend);
        }
        for dir in SCAFFOLD_DIRS {
            assert!(ws.specify_dir.join(dir).is_dir());
        }
    }

    #[test]
    fn test_start_overwrites_previous_feature() {
        let (_temp, ws) = create_installed_workspace();
        cmd_start(&ws, &start_args(Some("First"), Some("fe"))).unwrap();

        cmd_start(&ws, &start_args(Some("Second"), Some("ops"))).unwrap();

        let state = ScaffoldState::inspect(&ws).unwrap();
        let status = state.status.unwrap();
        assert_eq!(status.feature.as_deref(), Some("Second"));
        assert_eq!(status.agent.as_deref(), Some("DevOps Engineer"));
        assert_eq!(active_agent(&ws).unwrap().unwrap().key, "devops");
    }

    #[test]
    fn test_start_folds_multiline_feature() {
        let (_temp, ws) = create_installed_workspace();

        cmd_start(&ws, &start_args(Some("**Agent:** Spoof\nreal"), Some("be"))).unwrap();

        let status = ScaffoldState::inspect(&ws).unwrap().status.unwrap();
        assert_eq!(status.feature.as_deref(), Some("**Agent:** Spoof real"));
        assert_eq!(status.agent.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_start_missing_arguments_is_usage_error() {
        let (_temp, ws) = create_installed_workspace();

        for args in [
            start_args(None, None),
            start_args(Some("Feature"), None),
            start_args(Some("  "), Some("be")),
        ] {
            let err = cmd_start(&ws, &args).unwrap_err();
            assert!(matches!(err, PlaybookError::Usage(_)), "{:?}", args);
        }
        assert!(!ws.specify_dir.exists());
    }

    #[test]
    fn test_start_unknown_agent_mutates_nothing() {
        let (_temp, ws) = create_installed_workspace();

        let err = cmd_start(&ws, &start_args(Some("X"), Some("designer"))).unwrap_err();

        assert!(matches!(err, PlaybookError::UnknownAgent { .. }));
        assert!(!ws.specify_dir.exists());
        assert!(!ws.config_targets[0].exists());
    }

    #[test]
    fn test_start_before_install_mutates_nothing() {
        let (_temp, ws) = create_test_workspace();

        let err = cmd_start(&ws, &start_args(Some("X"), Some("be"))).unwrap_err();

        assert!(matches!(err, PlaybookError::AgentNotInstalled { .. }));
        assert!(!ws.specify_dir.exists());
    }

    #[test]
    fn test_status_without_scaffold_succeeds() {
        let (_temp, ws) = create_test_workspace();
        cmd_status(&ws).unwrap();
        assert!(!ws.specify_dir.exists());
    }

    #[test]
    fn test_dispatch_without_action_prints_help() {
        let (_temp, ws) = create_test_workspace();
        dispatch_speckit(&ws, SpeckitCommand { action: None }).unwrap();
        assert!(!ws.specify_dir.exists());
    }
}
