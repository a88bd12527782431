//! In-memory logging of comparison runs
//!
//! Logging is opt-in per comparison call and collects entries into a
//! [`DiffLogger`] owned by the caller. Nothing is written to stdout or to a
//! global logger, so a comparison never has side effects beyond its result.

use serde::{Deserialize, Serialize};

/// Log level for comparison logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - every descent
    Trace,
    /// Debug level - run boundaries and cycle skips
    Debug,
    /// Info level - reported differences
    Info,
    /// Warning level - potential issues
    Warn,
    /// Error level - aborted comparisons
    Error,
}

/// What happened during a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffEvent {
    ComparisonStarted,
    Descended,
    CycleSkipped,
    DifferenceFound,
    LengthMismatch,
    ComparisonFailed,
    ComparisonCompleted,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Position in the logger, assigned when recorded
    pub sequence: usize,
    /// Event kind if applicable
    pub event: Option<DiffEvent>,
    /// Dot-joined comparison path if applicable
    pub path: Option<String>,
    /// Runtime type name if applicable
    pub type_name: Option<String>,
    /// Log message
    pub message: String,
    /// Additional structured data
    pub metadata: Vec<(String, String)>,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            sequence: 0,
            event: None,
            path: None,
            type_name: None,
            message,
            metadata: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: DiffEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_type(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    /// Add metadata to the log entry
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.push((key, value));
        self
    }

    /// Look up a metadata value by key
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Logger that collects entries in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffLogger {
    entries: Vec<LogEntry>,
    min_level: LogLevel,
    recorded: usize,
}

impl DiffLogger {
    /// Create a new logger recording `min_level` and above
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
            recorded: 0,
        }
    }

    /// Create a logger that captures all levels
    pub fn all() -> Self {
        Self::new(LogLevel::Trace)
    }

    /// Create a logger that captures info and above
    pub fn with_info_level() -> Self {
        Self::new(LogLevel::Info)
    }

    /// Log an entry if it meets the minimum level
    pub fn log(&mut self, mut entry: LogEntry) {
        if self.should_log(entry.level) {
            entry.sequence = self.recorded;
            self.recorded += 1;
            self.entries.push(entry);
        }
    }

    /// Check if a log level should be recorded
    pub fn should_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn trace(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Trace, message));
    }

    pub fn debug(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Debug, message));
    }

    pub fn info(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: String) {
        self.log(LogEntry::new(LogLevel::Error, message));
    }

    /// Get all log entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all log entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recorded = 0;
    }

    /// Filter entries by log level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Filter entries by event kind
    pub fn filter_by_event(&self, event: DiffEvent) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event == Some(event))
            .collect()
    }

    /// Entries whose path starts with `prefix`
    pub fn filter_by_path(&self, prefix: &str) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.path.as_deref().map_or(false, |p| p.starts_with(prefix)))
            .collect()
    }
}

impl Default for DiffLogger {
    fn default() -> Self {
        Self::with_info_level()
    }
}
