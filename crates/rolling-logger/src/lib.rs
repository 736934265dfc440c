//! Rolling Logger
//!
//! A `tracing` layer that mirrors every event to the browser console (stderr
//! off-wasm) and keeps the most recent entries in a circular buffer.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Errors raised while installing the logger
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

// ========================
// Entries
// ========================

/// A single formatted log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
    /// Structured fields rendered as ` key=value` pairs
    pub fields: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} {}: {}{}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message,
            self.fields
        )
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields: String,
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

// ========================
// Circular Buffer
// ========================

/// Shared handle to the most recent log entries
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry, evicting the oldest one once full
    pub fn push(&self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of buffered entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// The newest `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// ========================
// Layer
// ========================

/// Tracing layer writing to the console and the circular buffer
pub struct RollingLayer {
    app_name: String,
    buffer: LogBuffer,
}

impl RollingLayer {
    pub fn new(app_name: impl Into<String>, buffer: LogBuffer) -> Self {
        Self {
            app_name: app_name.into(),
            buffer,
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        };
        write_line(&self.app_name, &entry);
        self.buffer.push(entry);
    }
}

#[cfg(target_arch = "wasm32")]
fn write_line(app_name: &str, entry: &LogEntry) {
    let line = format!("[{}] {}", app_name, entry);
    match entry.level {
        Level::ERROR => web_sys::console::error_1(&line.into()),
        Level::WARN => web_sys::console::warn_1(&line.into()),
        Level::INFO => web_sys::console::info_1(&line.into()),
        _ => web_sys::console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(app_name: &str, entry: &LogEntry) {
    eprintln!("[{}] {}", app_name, entry);
}

// ========================
// Initialization
// ========================

/// Install the global subscriber at the build's default level
/// (DEBUG for debug builds, INFO otherwise)
pub fn init_logger(app_name: &str, capacity: usize) -> Result<LogBuffer, LoggerError> {
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    init_logger_with_level(app_name, capacity, level)
}

pub fn init_logger_with_level(
    app_name: &str,
    capacity: usize,
    level: Level,
) -> Result<LogBuffer, LoggerError> {
    let buffer = LogBuffer::new(capacity);
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(RollingLayer::new(app_name, buffer.clone()))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;
    Ok(buffer)
}
