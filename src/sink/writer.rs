//! Line-oriented logfmt sink over any writer.

use std::io::Write;
use std::sync::Mutex;

use super::{LogRecord, LogSink, SinkError};

/// Writes one logfmt line per record.
///
/// Each record is written and flushed under a single lock, so lines from
/// concurrent callers never interleave.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        // A panic mid-write leaves at worst a partial line; keep logging.
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{record}")?;
        writer.flush()?;
        Ok(())
    }
}
