//! Error types for reporting and log sinks

use thiserror::Error;

/// Errors that can occur while reporting or writing logs
#[derive(Error, Debug)]
pub enum ReportError {
    /// Sink I/O failure
    #[error("Log sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// A batch references a document absent from the store
    #[error("Unknown document in batch: {0}")]
    UnknownDocument(String),

    /// Export requested for a document without extracted text
    #[error("Document has no extracted text: {0}")]
    NotExtracted(String),
}
