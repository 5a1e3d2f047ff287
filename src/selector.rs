//! Interactive agent selection.
//!
//! Prints a numbered menu and reads a single line. Anything that is not a
//! number between 1 and the number of agents, including bytes that are not
//! UTF-8, means "no selection".

use crate::error::{PlaybookError, Result};
use crate::registry::Agent;
use std::io::{BufRead, Write};

/// Outcome of reading the selection line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A valid menu entry was chosen.
    Agent(&'static Agent),

    /// `0`, empty input, EOF or non-numeric input.
    Skipped,

    /// A number with no matching entry, as typed. Treated like `Skipped` by
    /// callers.
    OutOfRange(String),
}

impl Selection {
    /// The chosen agent, if any.
    pub fn agent(self) -> Option<&'static Agent> {
        match self {
            Selection::Agent(agent) => Some(agent),
            Selection::Skipped | Selection::OutOfRange(_) => None,
        }
    }
}

/// Print the menu for `agents` to `output` and read one line from `input`.
///
/// Blocks until a line (or EOF) arrives.
pub fn prompt_selection<R: BufRead, W: Write>(
    agents: &'static [Agent],
    input: &mut R,
    output: &mut W,
) -> Result<Selection> {
    write_menu(agents, output)
        .map_err(|e| PlaybookError::io("failed to write agent menu", e))?;

    let mut line = Vec::new();
    input
        .read_until(b'\n', &mut line)
        .map_err(|e| PlaybookError::io("failed to read selection", e))?;

    let selection = parse_selection(agents, &String::from_utf8_lossy(&line));
    if let Selection::OutOfRange(choice) = &selection {
        tracing::warn!(
            choice = %choice,
            max = agents.len(),
            "selection out of range; treating as no selection"
        );
    }
    Ok(selection)
}

fn write_menu<W: Write>(agents: &[Agent], output: &mut W) -> std::io::Result<()> {
    writeln!(output, "  Select an agent to activate:")?;
    writeln!(output)?;
    for (i, agent) in agents.iter().enumerate() {
        writeln!(output, "  {:>2}. {:<20} ({})", i + 1, agent.name, agent.key)?;
    }
    writeln!(output, "   0. Skip")?;
    writeln!(output)?;
    write!(output, "  Choice [0-{}]: ", agents.len())?;
    output.flush()
}

/// Map one line of user input to a [`Selection`].
pub fn parse_selection(agents: &'static [Agent], line: &str) -> Selection {
    let choice = line.trim();
    if choice.is_empty() || !choice.bytes().all(|b| b.is_ascii_digit()) {
        return Selection::Skipped;
    }

    // All digits; a value too large for usize is out of range, not garbage.
    match choice.parse::<usize>() {
        Ok(0) => Selection::Skipped,
        Ok(n) => match agents.get(n - 1) {
            Some(agent) => Selection::Agent(agent),
            None => Selection::OutOfRange(choice.to_string()),
        },
        Err(_) => Selection::OutOfRange(choice.to_string()),
    }
}
