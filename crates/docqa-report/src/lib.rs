//! docqa Reporting Layer
//!
//! Pure aggregation over batches and query history, plus the append-only
//! sinks the rest of the pipeline logs through. Nothing in this crate
//! mutates documents or batches; it only observes and records.
//!
//! - [`batch_summary`]: counts and failure reasons for one batch
//! - [`HistoryLog`]: ordered, append-only Q&A history
//! - [`JsonlSink`] / [`MemorySink`]: activity-log sinks
//! - [`export`]: render one document as txt / json / html

#![warn(missing_docs)]

pub mod export;
pub mod history;
pub mod sink;
pub mod summary;

mod error;

pub use error::ReportError;
pub use export::ExportFormat;
pub use history::HistoryLog;
pub use sink::{JsonlSink, MemorySink};
pub use summary::{batch_summary, BatchSummary, FailureEntry};
