//! Recursive directory copy.
//!
//! Installing the agents tree merges into an existing destination: files are
//! overwritten one by one and nothing already present at the destination is
//! removed. A destination file that is the source file itself (same
//! directory, hard link, symlink) is left alone; copying a file onto itself
//! truncates it.

use crate::error::{PlaybookError, Result};
use same_file::is_same_file;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// What a [`copy_tree`] call touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    /// Regular files copied (new or overwritten).
    pub files: usize,

    /// Files skipped because the destination already is the source file.
    pub unchanged: usize,

    /// Directories visited, including the destination root.
    pub directories: usize,
}

/// Copy `source` into `destination`, replicating structure and contents.
///
/// Symlinks in the source are followed. `destination` is created if missing.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<CopyReport> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    let mut report = CopyReport::default();

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = match e.path() {
                Some(p) => format!("failed to read '{}'", p.display()),
                None => format!("failed to read '{}'", source.display()),
            };
            PlaybookError::io(context, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| {
                PlaybookError::Usage(format!(
                    "'{}' is outside '{}'",
                    entry.path().display(),
                    source.display()
                ))
            })?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                PlaybookError::io(
                    format!("failed to create directory '{}'", target.display()),
                    e,
                )
            })?;
            report.directories += 1;
        } else if target.exists() && same_file_at(entry.path(), &target)? {
            tracing::debug!(file = %target.display(), "destination is the source; skipped");
            report.unchanged += 1;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| {
                PlaybookError::io(
                    format!(
                        "failed to copy '{}' to '{}'",
                        entry.path().display(),
                        target.display()
                    ),
                    e,
                )
            })?;
            tracing::debug!(file = %target.display(), "copied");
            report.files += 1;
        }
    }

    Ok(report)
}

/// Whether `a` and `b` name the same file or directory on disk.
pub fn same_file_at(a: &Path, b: &Path) -> Result<bool> {
    is_same_file(a, b).map_err(|e| {
        PlaybookError::io(
            format!("failed to compare '{}' with '{}'", a.display(), b.display()),
            e,
        )
    })
}
