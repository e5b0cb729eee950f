//! Error types for the query router

use docqa_domain::DocumentId;
use thiserror::Error;

/// Errors that can occur while routing a query
#[derive(Error, Debug)]
pub enum QueryError {
    /// A selected document id does not exist in the store
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// A selected document has not (successfully) finished extraction
    #[error("Document '{0}' has no extracted text")]
    NotReady(String),

    /// The selection does not fit the request mode
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Multi-document query with nothing to query over
    #[error("No successfully extracted documents to query")]
    NoDocuments,

    /// The answering collaborator failed or timed out
    #[error("Answering service unavailable: {0}")]
    AnsweringUnavailable(String),

    /// Configuration or internal state problem
    #[error("Query configuration error: {0}")]
    Config(String),
}
