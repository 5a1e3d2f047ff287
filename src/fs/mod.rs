//! Filesystem utilities for playbook.
//!
//! Atomic whole-file writes for the configuration targets and a merging
//! recursive copy for installing the agents tree.

pub mod atomic;
mod copy;

pub use atomic::atomic_write_file;
pub use copy::{CopyReport, copy_tree, same_file_at};
