//! Directory snapshot engine
//!
//! Owns the tracked set for one directory (non-recursive) and reconciles it
//! against the live listing on every `status()`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::events::ChangeEvent;
use super::record::FileRecord;
use crate::error::{MonitorError, MonitorResult};

pub struct FolderMonitor {
    root: PathBuf,
    last_commit_time: SystemTime,
    tracked: BTreeMap<PathBuf, FileRecord>,
}

impl FolderMonitor {
    /// Snapshot every entry directly under `root`.
    ///
    /// Entries whose metadata cannot be read are skipped with a warning;
    /// the next `status()` reports them as new once they become readable.
    /// The tracked set therefore equals the directory listing only when
    /// every entry is readable.
    pub fn new<P: AsRef<Path>>(root: P) -> MonitorResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(MonitorError::DirectoryNotFound(root));
        }

        let mut tracked = BTreeMap::new();
        for path in list_entries(&root)? {
            match FileRecord::from_path(&path) {
                Ok(record) => {
                    tracked.insert(path, record);
                }
                Err(err) => tracing::warn!("Skipping {}: {}", path.display(), err),
            }
        }

        tracing::info!("Tracking {} entries in {}", tracked.len(), root.display());

        Ok(Self {
            root,
            last_commit_time: SystemTime::now(),
            tracked,
        })
    }

    /// Move the reference point for "modified since" to now.
    pub fn commit(&mut self) -> SystemTime {
        self.last_commit_time = SystemTime::now();
        tracing::info!("Snapshot updated for {}", self.root.display());
        self.last_commit_time
    }

    /// Reconcile the tracked set with the directory.
    ///
    /// Events come back as removals, then additions, then modifications,
    /// each group ordered by path. A listing failure leaves the tracked set
    /// untouched. Per-entry failures become error events in place.
    ///
    /// Stored record timestamps are never refreshed here, so a file stays
    /// "changed" on every call until the next `commit()`.
    pub fn status(&mut self) -> MonitorResult<Vec<ChangeEvent>> {
        let current: BTreeSet<PathBuf> = list_entries(&self.root)?.into_iter().collect();
        let mut events = Vec::new();

        let gone: Vec<PathBuf> = self
            .tracked
            .keys()
            .filter(|path| !current.contains(*path))
            .cloned()
            .collect();
        for path in gone {
            self.tracked.remove(&path);
            tracing::debug!("Removed {}", path.display());
            events.push(ChangeEvent::removed(path));
        }

        let mut kept = Vec::new();
        for path in current {
            if self.tracked.contains_key(&path) {
                kept.push(path);
                continue;
            }
            match FileRecord::from_path(&path) {
                Ok(record) => {
                    self.tracked.insert(path.clone(), record);
                    tracing::debug!("Added {}", path.display());
                    events.push(ChangeEvent::added(path));
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    events.push(ChangeEvent::error(path, error_cause(&err)));
                }
            }
        }

        for path in kept {
            match modified_time(&path) {
                Ok(modified) if modified > self.last_commit_time => {
                    tracing::debug!("Modified {}", path.display());
                    events.push(ChangeEvent::modified(path));
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("{}", err);
                    events.push(ChangeEvent::error(path, error_cause(&err)));
                }
            }
        }

        Ok(events)
    }

    /// Look up a record by base filename.
    ///
    /// Returns a copy of the first match in path order. Two paths sharing a
    /// filename (case-insensitive filesystems) resolve to whichever sorts first.
    pub fn info(&self, filename: &str) -> MonitorResult<FileRecord> {
        self.tracked
            .values()
            .find(|record| record.filename == filename)
            .cloned()
            .ok_or_else(|| MonitorError::NotFound(filename.to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn last_commit_time(&self) -> SystemTime {
        self.last_commit_time
    }

    pub fn tracked_paths(&self) -> impl Iterator<Item = &Path> {
        self.tracked.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

fn list_entries(root: &Path) -> MonitorResult<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| MonitorError::scan(root, e))?;
    entries
        .map(|entry| {
            entry
                .map(|entry| entry.path())
                .map_err(|e| MonitorError::scan(root, e))
        })
        .collect()
}

fn modified_time(path: &Path) -> MonitorResult<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| MonitorError::file(path, e))
}

fn error_cause(err: &MonitorError) -> String {
    match err {
        MonitorError::File { source, .. } | MonitorError::Scan { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = FolderMonitor::new(&missing).err().unwrap();
        assert!(matches!(err, MonitorError::DirectoryNotFound(p) if p == missing));
    }

    #[test]
    fn test_file_as_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            FolderMonitor::new(&file),
            Err(MonitorError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_commit_advances_reference_point() {
        let temp_dir = TempDir::new().unwrap();
        let mut monitor = FolderMonitor::new(temp_dir.path()).unwrap();

        let before = monitor.last_commit_time();
        let after = monitor.commit();
        assert!(after >= before);
        assert_eq!(monitor.last_commit_time(), after);
    }

    #[test]
    fn test_subdirectories_are_tracked_as_generic() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("nested.txt")).unwrap();
        fs::write(temp_dir.path().join("nested.txt").join("inner.txt"), "x").unwrap();

        let monitor = FolderMonitor::new(temp_dir.path()).unwrap();
        assert_eq!(monitor.len(), 1);

        let record = monitor.info("nested.txt").unwrap();
        assert_eq!(record.kind, crate::core::FileKind::Generic);
        assert!(monitor.info("inner.txt").is_err());
    }

    #[test]
    fn test_scan_error_keeps_state() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("watched");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "hello").unwrap();

        let mut monitor = FolderMonitor::new(&root).unwrap();
        fs::remove_dir_all(&root).unwrap();

        assert!(matches!(monitor.status(), Err(MonitorError::Scan { .. })));
        assert_eq!(monitor.len(), 1);
        assert!(monitor.info("a.txt").is_ok());
    }
}
