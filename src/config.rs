//! Configuration management for foldermon
//!
//! Settings come from an optional TOML file, then environment variables,
//! then command line flags (applied by the caller).

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

pub use crate::core::record::DEFAULT_TIME_FORMAT;

pub const DEFAULT_PROMPT: &str = "Enter command (commit, status, info [filename], exit): ";

/// Global configuration for foldermon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// What to monitor
    pub monitor: MonitorSettings,
    /// How results are printed
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Directory whose top-level entries are snapshotted
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Colorize status lines
    pub color: bool,
    /// chrono strftime pattern used for record timestamps
    pub time_format: String,
    /// Prompt printed before each interactive command
    pub prompt: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./test_folder"),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration from file or use default
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Override with environment variables if present
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("FOLDERMON_ROOT") {
            if !val.is_empty() {
                self.monitor.root = PathBuf::from(val);
            }
        }

        if std::env::var_os("FOLDERMON_NO_COLOR").is_some() {
            self.output.color = false;
        }

        if let Ok(val) = std::env::var("FOLDERMON_TIME_FORMAT") {
            self.output.time_format = val;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.monitor.root.as_os_str().is_empty() {
            bail!("monitor.root must not be empty");
        }

        if self.output.time_format.is_empty() {
            bail!("output.time_format must not be empty");
        }

        if StrftimeItems::new(&self.output.time_format).any(|item| matches!(item, Item::Error)) {
            bail!("output.time_format is not a valid strftime pattern: {}", self.output.time_format);
        }

        Ok(())
    }
}
