//! Configuration model for playbook.
//!
//! This module defines the Config struct that represents the optional
//! `playbook.yaml` in the working directory. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), defaults for every field, and
//! validation of config values.

mod model;
mod operations;


pub use model::Config;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "playbook.yaml";
