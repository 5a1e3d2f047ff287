//! Config loading and validation.

use super::model::Config;
use crate::error::{PlaybookError, Result};
use std::collections::HashSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlaybookError::io(
                format!("failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        Self::from_yaml(&content).map_err(|e| {
            PlaybookError::Config(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Load config from `path` if it exists, otherwise return defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                PlaybookError::Config(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Rules:
    /// - `config_targets` must be non-empty, with non-empty, unique entries
    /// - `agents_dir` and `specify_dir` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.config_targets.is_empty() {
            return Err(PlaybookError::Config(
                "config validation failed: config_targets must list at least one file"
                    .to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for target in &self.config_targets {
            if target.as_os_str().is_empty() {
                return Err(PlaybookError::Config(
                    "config validation failed: config_targets entries must be non-empty"
                        .to_string(),
                ));
            }
            if !seen.insert(target) {
                return Err(PlaybookError::Config(format!(
                    "config validation failed: config_targets lists '{}' more than once",
                    target.display()
                )));
            }
        }

        if self.agents_dir.as_os_str().is_empty() {
            return Err(PlaybookError::Config(
                "config validation failed: agents_dir must be non-empty".to_string(),
            ));
        }

        if self.specify_dir.as_os_str().is_empty() {
            return Err(PlaybookError::Config(
                "config validation failed: specify_dir must be non-empty".to_string(),
            ));
        }

        Ok(())
    }
}
