use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::analyzer::{self, Metrics};
use crate::error::{MonitorError, MonitorResult};

/// Timestamp pattern used when no other format is configured
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Classification label, fixed once when a file is first discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Generic,
    Text,
    Image,
    Program,
}

impl FileKind {
    /// Map an extension (with its leading dot, as captured from the path) to a kind.
    ///
    /// Matching is case-sensitive: `.TXT` is Generic.
    pub fn classify(extension: &str) -> Self {
        match extension {
            ".txt" => FileKind::Text,
            ".png" | ".jpg" => FileKind::Image,
            ".cpp" | ".java" => FileKind::Program,
            _ => FileKind::Generic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Generic => "Generic File",
            FileKind::Text => "Text File",
            FileKind::Image => "Image File",
            FileKind::Program => "Program File",
        }
    }
}

/// Metadata snapshot of one tracked directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub filename: String,
    pub extension: String,
    /// Falls back to the modification time where the platform has no birth time
    pub creation_time: SystemTime,
    pub last_modified_time: SystemTime,
    pub kind: FileKind,
    pub metrics: Metrics,
}

/// `.ext` for `name.ext`, empty when there is none
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl FileRecord {
    /// Read metadata for `path`, classify it and run the matching analyzer.
    pub fn from_path<P: AsRef<Path>>(path: P) -> MonitorResult<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| MonitorError::file(path, e))?;
        let last_modified_time = metadata.modified().map_err(|e| MonitorError::file(path, e))?;
        let creation_time = metadata.created().unwrap_or(last_modified_time);

        let extension = extension_of(path);
        let kind = if metadata.is_file() {
            FileKind::classify(&extension)
        } else {
            FileKind::Generic
        };
        let metrics = analyzer::analyze(kind, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            filename: filename_of(path),
            extension,
            creation_time,
            last_modified_time,
            kind,
            metrics,
        })
    }

    /// Multi-line description shown by `info`
    pub fn render(&self, time_format: &str) -> String {
        let mut out = format!(
            "Filename: {}\nExtension: {}\nCreation Time: {}\nLast Updated: {}\nType: {}\n",
            self.filename,
            self.extension,
            format_time(self.creation_time, time_format),
            format_time(self.last_modified_time, time_format),
            self.kind.label(),
        );

        match self.metrics {
            Metrics::None => {}
            Metrics::Text(m) => {
                out.push_str(&format!(
                    "Lines: {}\nWords: {}\nCharacters: {}\n",
                    m.line_count, m.word_count, m.char_count
                ));
            }
            Metrics::Program(m) => {
                out.push_str(&format!(
                    "Lines: {}\nClasses: {}\nMethods: {}\n",
                    m.line_count, m.class_count, m.method_count
                ));
            }
        }

        out
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_TIME_FORMAT))
    }
}

pub fn format_time(time: SystemTime, time_format: &str) -> String {
    DateTime::<Local>::from(time).format(time_format).to_string()
}
