// In-memory log capture for TUI display
//
// A custom tracing layer that stores events in a bounded ring buffer so the
// TUI can show them in an overlay. Writing logs to stdout while the
// alternate screen is active would garble the display; this keeps them
// reachable without touching the terminal.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Ring buffer capacity; older entries are dropped first.
const CAPACITY: usize = 500;

/// One captured log event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// "12:04:31 INFO  message" display line.
    pub fn display(&self) -> String {
        format!(
            "{} {:<5} {}",
            self.at.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Shared bounded buffer of recent log entries.
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most recent entries, oldest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

/// Tracing layer that feeds a `LogBuffer`.
pub struct BufferLayer {
    buffer: LogBuffer,
}

impl BufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for BufferLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.push(LogEntry {
            at: Utc::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
        });
    }
}

/// Pulls the `message` field out of a tracing event.
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
            // Strip the surrounding quotes Debug adds to plain strings
            if self.0.len() >= 2 && self.0.starts_with('"') && self.0.ends_with('"') {
                *self.0 = self.0[1..self.0.len() - 1].to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            at: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn buffer_keeps_most_recent() {
        let buffer = LogBuffer::new();
        for i in 0..CAPACITY + 10 {
            buffer.push(entry(&format!("m{}", i)));
        }
        assert_eq!(buffer.len(), CAPACITY);

        let recent = buffer.recent(1);
        assert_eq!(recent[0].message, format!("m{}", CAPACITY + 9));
    }

    #[test]
    fn recent_returns_oldest_first() {
        let buffer = LogBuffer::new();
        buffer.push(entry("first"));
        buffer.push(entry("second"));
        buffer.push(entry("third"));

        let recent = buffer.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "second");
        assert_eq!(recent[1].message, "third");
    }
}
