//! docqa Query Layer
//!
//! Routes questions over the session's documents: validates the selection,
//! assembles a budgeted context from extracted text, and dispatches one
//! answering call. Two modes are supported: single-document (the full text
//! of exactly one succeeded document) and multi-document (a fair share of
//! the budget per selected document, all succeeded documents by default).
//!
//! The router is a pure reader of the store; it never mutates documents and
//! never retries the answering collaborator.
//!
//! # Examples
//!
//! ```
//! use docqa_domain::{Document, QueryRequest};
//! use docqa_llm::MockAnswerer;
//! use docqa_query::{QueryConfig, QueryRouter};
//! use docqa_store::DocumentStore;
//! use std::sync::{Arc, Mutex};
//!
//! # tokio_test::block_on(async {
//! let mut store = DocumentStore::new();
//! let id = store.put(Document::new("notes.txt", 0)).unwrap();
//! store.complete(id, vec!["the answer is 42".into()]).unwrap();
//!
//! let store = Arc::new(Mutex::new(store));
//! let router = QueryRouter::new(
//!     MockAnswerer::new("42, per notes.txt"),
//!     store,
//!     QueryConfig::default(),
//! ).unwrap();
//!
//! let result = router
//!     .ask(QueryRequest::single("what is the answer?", id, "gpt-4.1-mini"))
//!     .await
//!     .unwrap();
//! assert_eq!(result.citations, vec![id]);
//! # });
//! ```

#![warn(missing_docs)]

pub mod context;

mod config;
mod error;
mod router;

pub use config::QueryConfig;
pub use error::QueryError;
pub use router::QueryRouter;
