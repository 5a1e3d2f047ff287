//! Whole-file atomic writes.
//!
//! Switching agents replaces the full content of each configuration file.
//! Content goes to `.{filename}.tmp` next to the target, is synced, and is
//! then renamed over the target, so a reader sees either the previous agent
//! or the new one and never a truncated mix.
//!
//! `std::fs::rename` replaces an existing target on both POSIX and Windows.
//! The temp file must live on the same filesystem as the target, which is
//! why it is created in the target's own directory.

use crate::error::{PlaybookError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to `path`, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PlaybookError::io(
                format!("failed to create parent directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PlaybookError::io(format!("failed to replace '{}'", path.display()), e)
    })
}

/// Atomically write a string to `path`.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Sibling temp path: `dir/.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PlaybookError::Usage(format!("invalid file path '{}'", target.display()))
        })?;

    let temp_name = format!(".{}.tmp", filename);
    Ok(match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        PlaybookError::io(
            format!("failed to create temporary file '{}'", path.display()),
            e,
        )
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(PlaybookError::io(
            format!("failed to write temporary file '{}'", path.display()),
            e,
        ));
    }

    Ok(())
}
