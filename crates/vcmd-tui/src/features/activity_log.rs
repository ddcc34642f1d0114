//! Append-only record of user-visible events.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

/// `2024-01-02 3:04:05pm (+00:00)`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %-I:%M:%S%P (%:z)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp, self.message)
    }
}

/// Timestamped entries, oldest first. Never trimmed.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` stamped with the local time.
    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(&Local::now(), message);
    }

    pub fn push_at<Tz>(&mut self, time: &DateTime<Tz>, message: impl Into<String>)
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let message = message.into();
        info!(target: "vcmd::activity", "{message}");
        self.entries.push(LogEntry {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages without timestamps, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn last_message(&self) -> Option<&str> {
        self.entries.last().map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
