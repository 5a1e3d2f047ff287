//! Implementation of the `playbook install` command.
//!
//! # What `playbook install` does
//!
//! 1. Verifies the bundled agents tree exists
//! 2. Copies it into `./agents/`, overwriting bundled files and keeping
//!    anything else already there
//! 3. Prints the installed structure
//! 4. Activates an agent: the one named by `--agent`, none with
//!    `--no-switch`, otherwise whatever the user picks from a menu

use super::switch::{print_switched, resolve_agent, switch_agent};
use crate::cli::InstallArgs;
use crate::context::Workspace;
use crate::error::{PlaybookError, Result};
use crate::fs::{CopyReport, copy_tree, same_file_at};
use crate::registry::{AGENTS, Agent};
use crate::selector::prompt_selection;
use std::io::{BufRead, Write};

/// Subdirectory of reference documents inside the agents tree.
pub const KNOWLEDGE_DIR: &str = "knowledge";

/// Project documentation, printed at the end of an install.
pub const DOCS_URL: &str = "https://github.com/space-metrics-ai/engineering-delivery-playbook";

/// Summary of an install.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub copied: CopyReport,

    /// The target directory existed before this install.
    pub updated: bool,

    /// The target directory is the source tree itself; nothing was rewritten.
    pub in_place: bool,

    /// Registered agents whose file is now present, in registry order.
    pub agents: Vec<&'static Agent>,

    /// Markdown documents under `knowledge/`.
    pub knowledge_docs: usize,
}

/// Copy the bundled tree into the workspace.
pub fn install_tree(ws: &Workspace) -> Result<InstallReport> {
    ws.ensure_source_exists()?;

    let updated = ws.agents_dir.exists();
    let in_place = updated && same_file_at(&ws.source_dir, &ws.agents_dir)?;
    if in_place {
        tracing::warn!(
            dir = %ws.agents_dir.display(),
            "install target is the source tree; leaving files as they are"
        );
    }
    tracing::debug!(
        source = %ws.source_dir.display(),
        target = %ws.agents_dir.display(),
        updated,
        "installing agents tree"
    );

    let copied = copy_tree(&ws.source_dir, &ws.agents_dir)?;

    let agents = AGENTS
        .iter()
        .filter(|agent| ws.agent_path(agent).is_file())
        .collect();

    Ok(InstallReport {
        copied,
        updated,
        in_place,
        agents,
        knowledge_docs: count_knowledge_docs(ws)?,
    })
}

fn count_knowledge_docs(ws: &Workspace) -> Result<usize> {
    let dir = ws.agents_dir.join(KNOWLEDGE_DIR);
    if !dir.is_dir() {
        return Ok(0);
    }

    let entries = std::fs::read_dir(&dir)
        .map_err(|e| PlaybookError::io(format!("failed to read '{}'", dir.display()), e))?;

    let mut count = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| PlaybookError::io(format!("failed to read '{}'", dir.display()), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            count += 1;
        }
    }
    Ok(count)
}

/// Execute the `playbook install` command.
///
/// `input` and `output` carry the interactive menu; everything else goes to
/// stdout.
pub fn cmd_install<R: BufRead, W: Write>(
    ws: &Workspace,
    args: &InstallArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    // Reject a bad --agent before touching the filesystem.
    let requested = args.agent.as_deref().map(resolve_agent).transpose()?;

    println!();
    println!("  Engineering Delivery Playbook");
    println!();
    println!("  Installing agents and knowledge bases...");
    println!();

    if ws.agents_dir.exists() {
        println!(
            "  Warning: {}/ directory already exists.",
            ws.display_path(&ws.agents_dir)
        );
        println!("  Updating with latest version...");
        println!();
    }

    let report = install_tree(ws)?;
    print_structure(ws, &report);

    let chosen = if let Some(agent) = requested {
        Some(agent)
    } else if args.no_switch {
        None
    } else {
        let selected = prompt_selection(AGENTS, input, output)?.agent();
        if selected.is_none() {
            println!();
            println!("  No agent selected.");
        }
        selected
    };

    println!();
    match chosen {
        Some(agent) => {
            let outcome = switch_agent(ws, agent)?;
            print_switched(ws, &outcome);
            println!();
            println!("  Next steps:");
            println!("  1. Open your AI tool in this directory");
            println!("  2. Start building!");
        }
        None => {
            println!("  Next steps:");
            println!("  1. Activate an agent with `playbook switch <agent>`");
            println!("  2. Start building!");
        }
    }
    println!();
    println!("  Docs: {}", DOCS_URL);
    println!();

    Ok(())
}

fn print_structure(ws: &Workspace, report: &InstallReport) {
    let root = ws.display_path(&ws.agents_dir);
    if report.in_place {
        println!(
            "  ./{}/ is the bundled tree itself; {} files left as they are.",
            root, report.copied.unchanged
        );
    } else {
        let verb = if report.updated { "Updated" } else { "Installed to" };
        println!(
            "  Done! {} ./{}/ ({} files in {} directories)",
            verb, root, report.copied.files, report.copied.directories
        );
    }
    println!();
    println!("  Structure:");
    println!("  └── {}/", root);

    let mut lines: Vec<String> = report.agents.iter().map(|a| a.file.to_string()).collect();
    if report.knowledge_docs > 0 {
        lines.push(format!(
            "{}/ ({} knowledge bases)",
            KNOWLEDGE_DIR, report.knowledge_docs
        ));
    }

    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let branch = if i == last { "└──" } else { "├──" };
        println!("      {} {}", branch, line);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_workspace, read, write_fake_source};
    use std::io::Cursor;

    fn install_with_input(ws: &Workspace, args: &InstallArgs, line: &str) -> Result<()> {
        let mut input = Cursor::new(line.to_string());
        let mut output = Vec::new();
        cmd_install(ws, args, &mut input, &mut output)
    }

    #[test]
    fn test_install_tree_copies_bundled_agents() {
        let (_temp, ws) = create_test_workspace();

        let report = install_tree(&ws).unwrap();

        assert!(!report.updated);
        assert_eq!(report.agents.len(), AGENTS.len());
        assert!(report.knowledge_docs > 0);
        for agent in AGENTS {
            assert_eq!(
                read(&ws.agent_path(agent)),
                read(&ws.source_dir.join(agent.file))
            );
        }
    }

    #[test]
    fn test_install_twice_keeps_file_set_and_local_files() {
        let (_temp, ws) = create_test_workspace();
        let first = install_tree(&ws).unwrap();
        let notes = ws.agents_dir.join("team-notes.md");
        std::fs::write(&notes, "ours").unwrap();

        let second = install_tree(&ws).unwrap();

        assert!(second.updated);
        assert_eq!(first.copied, second.copied);
        assert_eq!(read(&notes), "ours");
    }

    #[test]
    fn test_install_restores_edited_agent_file() {
        let (_temp, ws) = create_test_workspace();
        install_tree(&ws).unwrap();
        let backend = ws.agents_dir.join("backend.md");
        std::fs::write(&backend, "scribbled").unwrap();

        install_tree(&ws).unwrap();

        assert_eq!(read(&backend), read(&ws.source_dir.join("backend.md")));
    }

    #[test]
    fn test_install_from_own_target_keeps_contents() {
        let (temp, mut ws) = create_test_workspace();
        write_fake_source(&ws.agents_dir);
        std::fs::write(ws.agents_dir.join("backend.md"), "# Backend body\n").unwrap();
        ws.source_dir = temp.path().join("agents");

        let report = install_tree(&ws).unwrap();

        assert!(report.in_place);
        assert_eq!(report.copied.files, 0);
        assert_eq!(report.agents.len(), AGENTS.len());
        assert_eq!(read(&ws.agents_dir.join("backend.md")), "# Backend body\n");
        assert_eq!(
            read(&ws.agents_dir.join(KNOWLEDGE_DIR).join("testing.md")),
            "# Testing\n"
        );
    }

    #[test]
    fn test_install_missing_source_fails() {
        let (temp, mut ws) = create_test_workspace();
        ws.source_dir = temp.path().join("no-such-tree");

        let err = install_with_input(&ws, &InstallArgs::default(), "0\n").unwrap_err();

        assert!(matches!(err, PlaybookError::SourceMissing(_)));
        assert!(!ws.agents_dir.exists());
    }

    #[test]
    fn test_install_with_menu_choice_switches() {
        let (_temp, ws) = create_test_workspace();

        install_with_input(&ws, &InstallArgs::default(), "1\n").unwrap();

        let expected = read(&ws.agent_path(&AGENTS[0]));
        for target in &ws.config_targets {
            assert_eq!(read(target), expected);
        }
    }

    #[test]
    fn test_install_skip_and_out_of_range_do_not_switch() {
        for line in ["0\n", "\n", "abc\n", "999\n"] {
            let (_temp, ws) = create_test_workspace();

            install_with_input(&ws, &InstallArgs::default(), line).unwrap();

            assert!(ws.agents_dir.join("backend.md").is_file());
            for target in &ws.config_targets {
                assert!(!target.exists(), "input {:?} switched", line);
            }
        }
    }

    #[test]
    fn test_install_with_agent_flag_skips_menu() {
        let (_temp, ws) = create_test_workspace();
        let args = InstallArgs {
            agent: Some("cons".to_string()),
            no_switch: false,
        };
        let mut input = Cursor::new("3\n");
        let mut output = Vec::new();

        cmd_install(&ws, &args, &mut input, &mut output).unwrap();

        assert!(output.is_empty());
        assert_eq!(
            read(&ws.config_targets[0]),
            read(&ws.agents_dir.join("consultant.md"))
        );
    }

    #[test]
    fn test_install_with_unknown_agent_flag_copies_nothing() {
        let (_temp, ws) = create_test_workspace();
        let args = InstallArgs {
            agent: Some("qa".to_string()),
            no_switch: false,
        };

        let err = install_with_input(&ws, &args, "").unwrap_err();

        assert!(matches!(err, PlaybookError::UnknownAgent { .. }));
        assert!(!ws.agents_dir.exists());
    }

    #[test]
    fn test_install_no_switch() {
        let (_temp, ws) = create_test_workspace();
        let args = InstallArgs {
            agent: None,
            no_switch: true,
        };

        install_with_input(&ws, &args, "1\n").unwrap();

        assert!(ws.agents_dir.is_dir());
        assert!(!ws.config_targets[0].exists());
    }

    #[test]
    fn test_install_from_custom_source() {
        let (temp, mut ws) = create_test_workspace();
        let source = temp.path().join("custom");
        write_fake_source(&source);
        ws.source_dir = source;

        let report = install_tree(&ws).unwrap();

        assert_eq!(report.knowledge_docs, 1);
        assert_eq!(
            read(&ws.agents_dir.join("backend.md")),
            "# Backend Engineer\n"
        );
        assert!(ws.agents_dir.join(KNOWLEDGE_DIR).join("testing.md").is_file());
    }
}
