//! Append-only run log surfaced to the caller.
//!
//! Every user-visible event in a conversion run (per-file notices, per-asset
//! failures, save results) lands here in emission order. Entries are mirrored
//! to `tracing` at matching levels for operators watching the process live;
//! the structured sequence is what a UI or the CLI renders afterwards.
//!
//! The log is thread-safe so a caller may read it while a run is in flight.
//! Clearing is an explicit operation invoked by the caller between runs.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Notice,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Notice => write!(f, "NOTICE"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single immutable log entry. Ordering is emission order; no timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Thread-safe, append-only log for one or more pipeline runs.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a NOTICE entry.
    pub fn notice(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.push(Severity::Notice, message);
    }

    /// Append an ERROR entry.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{message}");
        self.push(Severity::Error, message);
    }

    fn push(&self, severity: Severity, message: String) {
        self.lock().push(LogEntry { severity, message });
    }

    /// Snapshot of all entries in emission order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Number of entries with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|e| e.severity == severity).count()
    }

    /// Explicit reset between runs.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A panic while holding the lock leaves the entries intact; keep going.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_preserve_emission_order() {
        let log = RunLog::new();
        log.notice("scanning");
        log.error("bad file");
        log.notice("done");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].severity, Severity::Notice);
        assert_eq!(entries[1].severity, Severity::Error);
        assert_eq!(entries[1].message, "bad file");
        assert_eq!(entries[2].message, "done");
    }

    #[test]
    fn test_clear_is_explicit() {
        let log = RunLog::new();
        log.error("first run failure");
        log.clear();
        assert!(log.entries().is_empty());

        log.notice("second run");
        assert_eq!(log.count(Severity::Notice), 1);
        assert_eq!(log.count(Severity::Error), 0);
    }

    #[test]
    fn test_entry_display() {
        let entry = LogEntry {
            severity: Severity::Error,
            message: "No image files found".into(),
        };
        assert_eq!(entry.to_string(), "ERROR: No image files found");
    }

    #[test]
    fn test_serializes_uppercase_severity() {
        let entry = LogEntry {
            severity: Severity::Notice,
            message: "ok".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"NOTICE\""));
    }
}

