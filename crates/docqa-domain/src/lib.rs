//! docqa Domain Layer
//!
//! This crate contains the core types and trait seams for the docqa
//! document question-answering pipeline. It has no external dependencies
//! beyond `uuid` and defines the fundamental concepts all other layers
//! depend upon.
//!
//! ## Key Concepts
//!
//! - **Document**: one uploaded source file with its per-page extracted text
//! - **Batch**: an ordered set of documents submitted together for extraction
//! - **QueryRequest / QueryResult**: one question over the session's
//!   documents and its recorded answer
//! - **FileKind**: the supported source-file formats
//!
//! ## Architecture
//!
//! The pipeline's collaborators (text extraction, answering, log sinks) are
//! external services. This crate only defines the trait boundaries; the
//! infrastructure implementations live in `docqa-extract`, `docqa-llm` and
//! `docqa-report`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod document;
pub mod file_kind;
pub mod log;
pub mod query;
pub mod traits;

// Re-exports for convenience
pub use batch::Batch;
pub use document::{Document, DocumentId, ExtractionStatus, FailureKind};
pub use file_kind::FileKind;
pub use log::LogRecord;
pub use query::{QueryMode, QueryRequest, QueryResult};
pub use traits::Answer;
