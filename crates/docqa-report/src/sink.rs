//! Append-only activity-log sinks
//!
//! Sinks implement the `LogSink` seam from `docqa-domain`. Records are
//! written as one JSON object per line, human-readable and strictly
//! chronological; nothing in the core ever reads them back.

use crate::ReportError;
use docqa_domain::traits::LogSink;
use docqa_domain::LogRecord;
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

fn record_to_json(record: &LogRecord) -> serde_json::Value {
    match record {
        LogRecord::DocumentProcessed {
            filename,
            page_count,
            timestamp,
        } => json!({
            "type": record.tag(),
            "filename": filename,
            "page_count": page_count,
            "timestamp": timestamp,
        }),
        LogRecord::DocumentPages { filename, pages } => json!({
            "type": record.tag(),
            "filename": filename,
            "pages": pages,
        }),
        LogRecord::Exchange {
            question,
            answer,
            timestamp,
        } => json!({
            "type": record.tag(),
            "question": question,
            "answer": answer,
            "timestamp": timestamp,
        }),
    }
}

/// File-backed JSONL sink
///
/// The file is opened in append mode; existing content is never touched.
#[derive(Debug)]
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Open (or create) the log file at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self { file })
    }
}

impl LogSink for JsonlSink {
    type Error = ReportError;

    fn append(&mut self, record: &LogRecord) -> Result<(), Self::Error> {
        let line = record_to_json(record).to_string();
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }
}

/// In-memory sink for tests
///
/// Clones share the same backing storage, so a test can hand one clone to
/// the coordinator and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of appended records
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    type Error = ReportError;

    fn append(&mut self, record: &LogRecord) -> Result<(), Self::Error> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}
