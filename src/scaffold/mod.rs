//! Workflow scaffold ("speckit") state.
//!
//! The scaffold is a fixed directory tree under `.specify/` plus one
//! generated status file, `.specify/prompt.md`. This module owns the layout,
//! the status file template and the read-side inspection used by
//! `speckit status`. Command output lives in `commands::speckit`.

mod template;

pub use template::{TemplateError, render_template};

use crate::context::Workspace;
use crate::error::{PlaybookError, Result};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

/// Subdirectories created under the scaffold root, in creation order.
pub const SCAFFOLD_DIRS: &[&str] = &["memory", "scripts", "specs", "templates"];

/// Status file template. `{feature}` and `{agent}` are substituted.
pub const STATUS_TEMPLATE: &str = "\
# Speckit Workflow

**Feature:** {feature}
**Agent:** {agent}

## Workflow

Drive the feature through the phases below with the active agent. Keep the
specification in `specs/`, reusable documents in `templates/`, helper
scripts in `scripts/` and long-lived project context in `memory/`.

## Checklist

- [x] Initialize workflow
- [ ] Write the feature specification
- [ ] Clarify open questions
- [ ] Produce the implementation plan
- [ ] Break the plan into tasks
- [ ] Implement
- [ ] Review and verify
";

static FEATURE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Feature:\*\*[ \t]*(.*?)[ \t]*$").expect("Invalid feature regex")
});

static AGENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Agent:\*\*[ \t]*(.*?)[ \t]*$").expect("Invalid agent regex")
});

static CHECKLIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*] \[([ xX])\]").expect("Invalid checklist regex"));

/// Result of `speckit init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The scaffold root was absent and has been created.
    Created,

    /// The scaffold root already existed; nothing was touched.
    AlreadyExists,
}

/// Create the scaffold unless its root already exists.
pub fn init_scaffold(ws: &Workspace) -> Result<InitOutcome> {
    if ws.specify_dir.exists() {
        return Ok(InitOutcome::AlreadyExists);
    }

    ensure_scaffold_dirs(ws)?;
    Ok(InitOutcome::Created)
}

/// Create any missing scaffold directories. Existing content is left alone.
pub fn ensure_scaffold_dirs(ws: &Workspace) -> Result<()> {
    for dir in SCAFFOLD_DIRS {
        let path = ws.specify_dir.join(dir);
        fs::create_dir_all(&path).map_err(|e| {
            PlaybookError::io(
                format!("failed to create directory '{}'", path.display()),
                e,
            )
        })?;
        tracing::debug!(dir = %path.display(), "scaffold directory ready");
    }
    Ok(())
}

/// Render the status file for `feature` worked on by `agent_name`.
///
/// Both values are folded onto one line; the status file keeps one field
/// per line.
pub fn render_status(feature: &str, agent_name: &str) -> Result<String> {
    let feature = single_line(feature);
    let agent_name = single_line(agent_name);
    Ok(render_template(
        STATUS_TEMPLATE,
        &[("feature", &feature), ("agent", &agent_name)],
    )?)
}

/// Join the non-blank lines of `text` with single spaces.
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fields recovered from an existing status file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFile {
    pub feature: Option<String>,
    pub agent: Option<String>,

    /// Checked checklist items.
    pub done: usize,

    /// All checklist items.
    pub total: usize,
}

impl StatusFile {
    /// Parse a status file. Missing fields are left as `None`.
    pub fn parse(content: &str) -> Self {
        let mut done = 0;
        let mut total = 0;
        for caps in CHECKLIST_ITEM.captures_iter(content) {
            total += 1;
            if !caps[1].trim().is_empty() {
                done += 1;
            }
        }

        Self {
            feature: capture_field(&FEATURE_LINE, content),
            agent: capture_field(&AGENT_LINE, content),
            done,
            total,
        }
    }
}

fn capture_field(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .map(|caps| caps[1].to_string())
        .filter(|value| !value.is_empty())
}

/// Snapshot of the scaffold on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldState {
    /// Whether the scaffold root exists.
    pub exists: bool,

    /// Subdirectories from [`SCAFFOLD_DIRS`] that are present.
    pub present: Vec<&'static str>,

    /// Subdirectories from [`SCAFFOLD_DIRS`] that are missing.
    pub missing: Vec<&'static str>,

    /// Parsed status file, when one has been written.
    pub status: Option<StatusFile>,
}

impl ScaffoldState {
    /// Inspect the scaffold without modifying anything.
    pub fn inspect(ws: &Workspace) -> Result<Self> {
        let (present, missing): (Vec<&'static str>, Vec<&'static str>) = SCAFFOLD_DIRS
            .iter()
            .copied()
            .partition(|dir| ws.specify_dir.join(dir).is_dir());

        let prompt_path = ws.prompt_path();
        let status = if prompt_path.is_file() {
            let content = fs::read_to_string(&prompt_path).map_err(|e| {
                PlaybookError::io(
                    format!("failed to read '{}'", prompt_path.display()),
                    e,
                )
            })?;
            Some(StatusFile::parse(&content))
        } else {
            None
        };

        Ok(Self {
            exists: ws.specify_dir.is_dir(),
            present,
            missing,
            status,
        })
    }
}
