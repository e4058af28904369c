//! Core functionality module
//!
//! Contains the snapshot engine, file records, per-kind analyzers and change events

pub mod analyzer;
pub mod events;
pub mod monitor;
pub mod record;

// Re-export main types
pub use analyzer::{Metrics, ProgramMetrics, TextMetrics};
pub use events::{ChangeEvent, ChangeKind};
pub use monitor::FolderMonitor;
pub use record::{FileKind, FileRecord};
