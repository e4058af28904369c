use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::MonitorConfig;

#[derive(Parser)]
#[command(name = "foldermon")]
#[command(version)]
#[command(about = "Snapshot a folder, then ask what was added, removed or changed since the last commit")]
#[command(long_about = "foldermon tracks the top-level entries of one directory. `commit` moves the reference point, `status` lists what was added, deleted or modified since then, and `info <file>` prints type-specific details for a tracked file.")]
pub struct Cli {
    /// Directory to monitor
    #[arg(value_name = "PATH", help = "Directory to monitor (overrides the config file)")]
    pub path: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    /// Output format for status results
    #[arg(long, default_value = "text", help = "Output format")]
    pub output: OutputFormat,

    /// Commands to run without the interactive prompt
    #[arg(short = 'c', long = "command", value_name = "CMD", help = "Run a command and exit (repeatable)")]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines (default)
    Text,
    /// JSON output for scripting
    Json,
}

impl Cli {
    /// Apply command line overrides on top of file and environment settings
    pub fn apply_to(&self, config: &mut MonitorConfig) {
        if let Some(ref path) = self.path {
            config.monitor.root = path.clone();
        }
        if self.no_color {
            config.output.color = false;
        }
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose { "debug" } else { "info" };

        // RUST_LOG wins when set
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        if self.commands.iter().any(|cmd| cmd.trim().is_empty()) {
            return Err("Commands passed with --command must not be empty".to_string());
        }

        Ok(())
    }
}
