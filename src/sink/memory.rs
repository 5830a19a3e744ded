//! In-memory sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{LogRecord, LogSink, SinkError};

/// Sink that keeps every record in memory.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    fail_on_log: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `log` rejects records with [`SinkError::Closed`].
    pub fn set_fail_on_log(&self, fail: bool) {
        self.fail_on_log.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all records emitted so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    // A panic elsewhere must not hide the records captured so far.
    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        if self.fail_on_log.load(Ordering::SeqCst) {
            return Err(SinkError::Closed);
        }
        self.lock().push(record.clone());
        Ok(())
    }
}
