//! Structured log sinks.
//!
//! A sink accepts one ordered key-value [`LogRecord`] per call. Formatting,
//! transport and storage belong to the sink; callers only build records.
//!
//! # Available Sinks
//!
//! - [`TracingSink`] - Emits each record as a `tracing` event
//! - [`WriterSink`] - Writes one logfmt line per record to any `io::Write`
//! - [`MemorySink`] - Keeps records in memory for inspection
//! - [`Context`] - Prepends bound fields before forwarding to another sink

use std::sync::Arc;

mod memory;
mod record;
mod tracing_sink;
mod writer;

pub use memory::MemorySink;
pub use record::{LogRecord, LogValue};
pub use tracing_sink::TracingSink;
pub use writer::WriterSink;

/// Errors a sink can report when emitting a record.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Log write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log sink closed")]
    Closed,
}

/// Destination for structured log records.
pub trait LogSink: Send + Sync {
    /// Emit one record.
    fn log(&self, record: &LogRecord) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).log(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).log(record)
    }
}

/// Sink wrapper that binds static fields ahead of every record.
///
/// # Example
///
/// ```ignore
/// let sink = Context::new(TracingSink::new())
///     .with("service", "reaction")
///     .with("store", "memory");
/// ```
pub struct Context<S> {
    inner: S,
    bound: Vec<(&'static str, LogValue)>,
}

impl<S: LogSink> Context<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            bound: Vec::new(),
        }
    }

    /// Bind another field; bound fields keep their order.
    pub fn with(mut self, key: &'static str, value: impl Into<LogValue>) -> Self {
        self.bound.push((key, value.into()));
        self
    }
}

impl<S: LogSink> LogSink for Context<S> {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut full = LogRecord::with_capacity(self.bound.len() + record.len());
        full.extend(self.bound.iter().cloned());
        full.extend(record.fields().iter().cloned());
        self.inner.log(&full)
    }
}
