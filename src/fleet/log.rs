//! fleet::log
//!
//! The append-only action-log sink.
//!
//! # Design
//!
//! The facade reports noteworthy mutations (vehicle added, driver
//! assigned) as human-readable lines to an [`ActionLog`] collaborator.
//! The library ships two sinks: [`FileActionLog`], which appends
//! timestamped lines to a log file, and [`NullActionLog`], which drops
//! everything and keeps the facade usable without a sink.
//!
//! Logging must never fail an operation: sink errors are reported to
//! stderr and swallowed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::types::UtcTimestamp;

/// Default log file, relative to the working directory.
pub const DEFAULT_ACTION_LOG: &str = "logs/actions.log";

/// Sink for human-readable action entries.
pub trait ActionLog {
    /// Record one entry.
    fn record(&self, message: &str);
}

/// Discards all entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActionLog;

impl ActionLog for NullActionLog {
    fn record(&self, _message: &str) {}
}

/// Appends timestamped entries to a file, one per line.
///
/// The parent directory is created on first write. Entries look like:
///
/// ```text
/// [2026-08-06T12:00:00+00:00] alice added bus LiAZ-5292, route 42, year 2020
/// ```
#[derive(Debug, Clone)]
pub struct FileActionLog {
    path: PathBuf,
}

impl FileActionLog {
    /// Create a sink writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, message: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}] {}", UtcTimestamp::now(), message)
    }
}

impl ActionLog for FileActionLog {
    fn record(&self, message: &str) {
        if let Err(e) = self.append(message) {
            eprintln!("warning: failed to write action log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("actions.log");
        let log = FileActionLog::new(&path);

        log.record("alice added bus LiAZ-5292");
        log.record("driver Ivan Petrov assigned to B-1");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("alice added bus LiAZ-5292"));
        assert!(lines[1].contains("Ivan Petrov"));
        // Each line carries a timestamp prefix.
        assert!(lines[0].starts_with('['));
    }

    #[test]
    fn null_log_discards() {
        // Nothing observable; just exercise the path.
        NullActionLog.record("dropped");
    }
}
