//! Log sink capability injected into the driver.
//!
//! The driver never writes to a global logger directly. Every line it wants
//! an operator to see goes through a [`LogSink`], so tests can capture output
//! and embedding programs can route it wherever they like. [`TracingSink`]
//! is the production implementation.

use crate::color::Color;
use crate::diff::RouteDiff;
use std::sync::Arc;
use tracing::{info, warn};

/// Tracing target used by [`TracingSink`].
pub const LOG_TARGET: &str = "routesync";

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
}

/// One line of operator-facing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Colour tag for the whole line; `None` for uncoloured output.
    pub color: Option<Color>,
    /// Structured diff when the message is a rendered route diff.
    pub diff: Option<RouteDiff>,
}

impl LogRecord {
    /// Creates a record at the given level.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            color: None,
            diff: None,
        }
    }

    /// Creates an info record.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    /// Creates a warning record.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Level::Warn, message)
    }

    /// Tags the record with a colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Attaches the structured diff the message was rendered from.
    pub fn with_diff(mut self, diff: RouteDiff) -> Self {
        self.diff = Some(diff);
        self
    }
}

/// Destination for driver output.
///
/// Output is fire-and-forget: a sink cannot fail the operation that
/// produced the record.
pub trait LogSink: Send + Sync {
    /// Emits one record.
    fn log(&self, record: &LogRecord);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, record: &LogRecord) {
        (**self).log(record)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, record: &LogRecord) {
        (**self).log(record)
    }
}

/// Sink that forwards every record to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    color: bool,
}

impl TracingSink {
    /// Creates a sink; with `color`, tagged records are painted with ANSI
    /// escapes before they reach the subscriber.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Returns the text that will be handed to `tracing` for `record`.
    pub fn format(&self, record: &LogRecord) -> String {
        match record.color {
            Some(color) if self.color => color.paint(&record.message),
            _ => record.message.clone(),
        }
    }
}

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        let text = self.format(record);
        let has_diff = record.diff.is_some();
        match record.level {
            Level::Info => info!(target: LOG_TARGET, diff = has_diff, "{}", text),
            Level::Warn => warn!(target: LOG_TARGET, diff = has_diff, "{}", text),
        }
    }
}
