//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the pipeline and the services
//! it delegates to. Infrastructure implementations live in other crates:
//! text extraction in `docqa-extract`, answering in `docqa-llm`, log sinks
//! in `docqa-report`.

use crate::{FileKind, LogRecord};

/// An answer returned by the answering collaborator
///
/// Citations are whatever document references the collaborator chose to
/// include; the pipeline passes them through without verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Answer text
    pub text: String,
    /// Document names the collaborator cited, if any
    pub citations: Vec<String>,
}

impl Answer {
    /// Build an answer with no citations
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

/// Trait for text-extraction collaborators
///
/// Implemented by `docqa-extract` (native decoders, remote OCR service, and
/// a deterministic mock). Returns the ordered per-page text of the document.
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract per-page text from raw file bytes of the declared kind
    fn extract(&self, bytes: &[u8], kind: FileKind) -> Result<Vec<String>, Self::Error>;
}

/// Trait for answering collaborators
///
/// Implemented by `docqa-llm`. The call is synchronous from the caller's
/// perspective; callers bound it with a timeout.
pub trait AnsweringService {
    /// Error type for answering operations
    type Error;

    /// Answer a question against the assembled context using the given model
    fn answer(&self, question: &str, context: &str, model: &str) -> Result<Answer, Self::Error>;
}

/// Trait for append-only log sinks
///
/// Implemented by `docqa-report`. Sinks never reorder or delete prior
/// entries; no read API is required by the core.
pub trait LogSink {
    /// Error type for sink operations
    type Error;

    /// Append one record to the log
    fn append(&mut self, record: &LogRecord) -> Result<(), Self::Error>;
}
