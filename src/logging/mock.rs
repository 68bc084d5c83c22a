//! Mock logging sink for testing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Level, Log, LogFactory};

/// One captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Declaring type name the record was scoped to.
    pub scope: String,
    pub level: Level,
    pub message: String,
}

/// In-memory logging sink for tests.
///
/// A single capture store backs every logger the factory hands out, so a
/// test can assert over all records regardless of scope. Levels can be
/// disabled to verify deferred formatting.
#[derive(Debug, Default)]
pub struct CaptureLog {
    records: Mutex<Vec<CapturedRecord>>,
    disabled: Mutex<HashSet<Level>>,
}

impl CaptureLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Factory handing out loggers that write into this capture store.
    pub fn factory(self: &Arc<Self>) -> LogFactory {
        let capture = Arc::clone(self);
        Arc::new(move |scope: &str| -> Arc<dyn Log> {
            Arc::new(ScopedCapture {
                capture: Arc::clone(&capture),
                scope: scope.to_string(),
            })
        })
    }

    /// Stop emitting records at `level`.
    pub fn disable(&self, level: Level) {
        self.disabled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(level);
    }

    /// Snapshot of all captured records, in emission order.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the captured records.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Whether any record at `level` contains `fragment`.
    pub fn contains(&self, level: Level, fragment: &str) -> bool {
        self.records()
            .iter()
            .any(|record| record.level == level && record.message.contains(fragment))
    }

    /// All records at one level.
    pub fn at_level(&self, level: Level) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }

    fn push(&self, record: CapturedRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn level_enabled(&self, level: Level) -> bool {
        !self
            .disabled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&level)
    }
}

struct ScopedCapture {
    capture: Arc<CaptureLog>,
    scope: String,
}

impl Log for ScopedCapture {
    fn enabled(&self, level: Level) -> bool {
        self.capture.level_enabled(level)
    }

    fn write(&self, level: Level, message: String) {
        self.capture.push(CapturedRecord {
            scope: self.scope.clone(),
            level,
            message,
        });
    }
}
