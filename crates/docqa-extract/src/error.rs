//! Error types for extraction collaborators

use thiserror::Error;

/// Errors that can occur during text extraction
///
/// All variants are per-document: the ingestion coordinator records them on
/// the failed document and continues with the rest of the batch.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No extractor can handle this file kind
    #[error("Unsupported file kind: {0}")]
    Unsupported(String),

    /// The extraction backend failed to produce text
    #[error("Extraction failed: {0}")]
    Failed(String),

    /// Network or API communication error with the remote service
    #[error("Communication error: {0}")]
    Communication(String),

    /// The remote service returned a malformed response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The file bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}
