//! Error types for the ingestion coordinator
//!
//! Per-file failures are never surfaced through these: they are recorded on
//! the failed document (`FailureKind` + reason) and the batch continues.
//! `IngestError` covers the batch-level conditions only.

use thiserror::Error;

/// Batch-level errors from the ingestion coordinator
#[derive(Error, Debug)]
pub enum IngestError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store rejected an operation
    #[error("Store error: {0}")]
    Store(String),

    /// A pooled extraction task panicked or was aborted
    #[error("Worker error: {0}")]
    Worker(String),
}
