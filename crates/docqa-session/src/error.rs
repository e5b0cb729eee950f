//! Error types for the session facade

use docqa_ingest::IngestError;
use docqa_query::QueryError;
use docqa_report::ReportError;
use thiserror::Error;

/// Errors surfaced by the session facade
///
/// Mostly pass-throughs from the layer that failed; `Store` and `Config`
/// cover the session's own wiring.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The ingestion coordinator reported a batch-level error
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// The query router rejected or failed the request
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Reporting or export failed
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Document store access failed
    #[error("Store error: {0}")]
    Store(String),

    /// Session configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}
