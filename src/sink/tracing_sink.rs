//! Sink backed by the `tracing` ecosystem.

use tracing::field::display;
use tracing::info;

use super::{LogRecord, LogSink, LogValue, SinkError};

/// Emits each record as a single INFO event on the `reaction` target.
///
/// The well-known keys (`service`, `store`, `method`, `namespace`,
/// `duration_ns`, `err`) become structured event fields so JSON layers can
/// index them. The full ordered record is rendered as logfmt in the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        let field = |key: &str| record.get(key).map(display);
        info!(
            target: "reaction",
            service = field("service"),
            store = field("store"),
            method = field("method"),
            namespace = field("namespace"),
            duration_ns = record.get("duration_ns").and_then(LogValue::as_u64),
            err = field("err"),
            "{}",
            record
        );
        Ok(())
    }
}
