//! docqa Ingestion Layer
//!
//! The ingestion coordinator turns a batch of raw file payloads into
//! documents in the session store, delegating text extraction to a
//! `TextExtractor` collaborator.
//!
//! # Contract
//!
//! - Every file is processed independently: one corrupt file never prevents
//!   the rest of the batch from succeeding.
//! - Files are gated before extraction: allowlist, hard size cap, and an
//!   oversize-confirmation threshold.
//! - A progress event is emitted after each file; the completed count is
//!   monotonic.
//! - A batch in progress can be abandoned between files; the in-flight file
//!   always completes.
//!
//! # Example
//!
//! ```no_run
//! use docqa_ingest::{IngestConfig, IngestFile, IngestOptions, IngestionCoordinator};
//! use docqa_extract::MockExtractor;
//! use docqa_store::DocumentStore;
//! use std::sync::{Arc, Mutex};
//!
//! # struct NullSink;
//! # impl docqa_domain::traits::LogSink for NullSink {
//! #     type Error = std::convert::Infallible;
//! #     fn append(&mut self, _: &docqa_domain::LogRecord) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Mutex::new(DocumentStore::new()));
//! let coordinator = IngestionCoordinator::new(
//!     MockExtractor::default(),
//!     store.clone(),
//!     NullSink,
//!     IngestConfig::default(),
//! )?;
//!
//! let files = vec![IngestFile::new("notes.txt", b"hello".to_vec())];
//! let batch = coordinator.ingest_batch(files, IngestOptions::default()).await?;
//! assert_eq!(batch.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod coordinator;
mod error;
mod progress;

#[cfg(test)]
mod tests;

pub use config::IngestConfig;
pub use coordinator::{IngestFile, IngestOptions, IngestionCoordinator};
pub use error::IngestError;
pub use progress::{CancelFlag, ProgressEvent};
