use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use super::record::filename_of;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChangeKind {
    Removed,
    Added,
    Modified,
    /// The entry's metadata or content could not be read during reconciliation
    Error { message: String },
}

/// One line of `status` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub filename: String,
    #[serde(flatten)]
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: PathBuf, kind: ChangeKind) -> Self {
        let filename = filename_of(&path);
        Self { path, filename, kind }
    }

    pub fn removed(path: PathBuf) -> Self {
        Self::new(path, ChangeKind::Removed)
    }

    pub fn added(path: PathBuf) -> Self {
        Self::new(path, ChangeKind::Added)
    }

    pub fn modified(path: PathBuf) -> Self {
        Self::new(path, ChangeKind::Modified)
    }

    pub fn error(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(path, ChangeKind::Error { message: message.into() })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ChangeKind::Error { .. })
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ChangeKind::Removed => write!(f, "{} was deleted.", self.filename),
            ChangeKind::Added => write!(f, "{} is a new file.", self.filename),
            ChangeKind::Modified => write!(f, "{} has changed.", self.filename),
            ChangeKind::Error { message } => write!(f, "Error reading {}: {}", self.filename, message),
        }
    }
}
