//! Monitor error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors that can occur while snapshotting or querying a folder.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The root path is missing or is not a directory
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The root directory could not be listed during reconciliation
    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single entry's metadata or content could not be read
    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No tracked record carries the requested filename
    #[error("File not found: {0}")]
    NotFound(String),
}

impl MonitorError {
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan { path: path.into(), source }
    }

    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_like_the_shell_message() {
        let err = MonitorError::NotFound("notes.txt".to_string());
        assert_eq!(err.to_string(), "File not found: notes.txt");
    }

    #[test]
    fn scan_error_names_the_root() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = MonitorError::scan("/tmp/watched", io);
        assert_eq!(err.to_string(), "Failed to scan /tmp/watched: gone");
    }
}
