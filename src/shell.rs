//! Interactive command loop
//!
//! Reads one command per line, runs it against a [`FolderMonitor`] and
//! prints the result. Nothing here is fatal except I/O on the output itself.

use std::io::{self, BufRead, Write};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::OutputSettings;
use crate::core::{ChangeEvent, ChangeKind, FolderMonitor};
use crate::core::record::format_time;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Commit,
    Status,
    /// `None` when the filename argument was left out
    Info(Option<String>),
    Exit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Command::Empty,
            "commit" => Command::Commit,
            "status" => Command::Status,
            "info" if rest.is_empty() => Command::Info(None),
            "info" => Command::Info(Some(rest.to_string())),
            "exit" | "quit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub struct Shell<R, W> {
    monitor: FolderMonitor,
    input: R,
    output: W,
    settings: OutputSettings,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        monitor: FolderMonitor,
        input: R,
        output: W,
        settings: OutputSettings,
        format: OutputFormat,
    ) -> Self {
        Self {
            monitor,
            input,
            output,
            settings,
            format,
        }
    }

    /// Prompt, read and execute until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", self.settings.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            if !self.execute(&Command::parse(&line))? {
                break;
            }
        }
        Ok(())
    }

    /// Run one command. Returns `false` once the session should end.
    pub fn execute(&mut self, command: &Command) -> io::Result<bool> {
        tracing::debug!("Executing {:?}", command);

        match command {
            Command::Commit => {
                let at = self.monitor.commit();
                match self.format {
                    OutputFormat::Text => writeln!(self.output, "Snapshot updated.")?,
                    OutputFormat::Json => {
                        let at = format_time(at, "%Y-%m-%dT%H:%M:%S%.f%:z");
                        writeln!(self.output, "{}", json!({ "committed": at }))?;
                    }
                }
            }
            Command::Status => match self.monitor.status() {
                Ok(events) => self.print_events(&events)?,
                Err(err) => {
                    tracing::error!("Status failed: {}", err);
                    self.print_error(&err.to_string())?;
                }
            },
            Command::Info(None) => writeln!(self.output, "Usage: info <filename>")?,
            Command::Info(Some(name)) => match self.monitor.info(name) {
                Ok(record) => match self.format {
                    OutputFormat::Text => {
                        write!(self.output, "{}", record.render(&self.settings.time_format))?
                    }
                    OutputFormat::Json => {
                        writeln!(self.output, "{}", serde_json::to_string(&record)?)?
                    }
                },
                Err(err) => match self.format {
                    OutputFormat::Text => writeln!(self.output, "{}", err)?,
                    OutputFormat::Json => {
                        writeln!(self.output, "{}", json!({ "error": err.to_string() }))?
                    }
                },
            },
            Command::Exit => return Ok(false),
            Command::Empty => {}
            Command::Unknown(word) => {
                tracing::debug!("Unknown command: {}", word);
                writeln!(self.output, "Unknown command.")?;
            }
        }

        Ok(true)
    }

    pub fn monitor(&self) -> &FolderMonitor {
        &self.monitor
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print_events(&mut self, events: &[ChangeEvent]) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            for event in events {
                writeln!(self.output, "{}", serde_json::to_string(event)?)?;
            }
            return Ok(());
        }

        if events.is_empty() {
            writeln!(self.output, "No changes.")?;
            return Ok(());
        }

        for event in events {
            if self.settings.color {
                let color = match event.kind {
                    ChangeKind::Removed => "\x1b[31m",      // Red
                    ChangeKind::Added => "\x1b[32m",        // Green
                    ChangeKind::Modified => "\x1b[33m",     // Yellow
                    ChangeKind::Error { .. } => "\x1b[35m", // Magenta
                };
                writeln!(self.output, "{}{}\x1b[0m", color, event)?;
            } else {
                writeln!(self.output, "{}", event)?;
            }
        }
        Ok(())
    }

    fn print_error(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.output, "Error: {}", message),
            OutputFormat::Json => writeln!(self.output, "{}", json!({ "error": message })),
        }
    }
}
