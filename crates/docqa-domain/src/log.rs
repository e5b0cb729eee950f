//! Log records for the append-only activity log

/// One record for the session-wide, append-only activity log
///
/// The log is human-readable, strictly chronological, and never read back by
/// the core; sinks live in `docqa-report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// Summary line written once per successfully processed document
    DocumentProcessed {
        /// Original filename
        filename: String,
        /// Number of extracted pages
        page_count: usize,
        /// When processing finished (seconds since Unix epoch)
        timestamp: u64,
    },
    /// Structured entry with the full per-page text of one document
    DocumentPages {
        /// Original filename
        filename: String,
        /// Ordered per-page extracted text
        pages: Vec<String>,
    },
    /// One question/answer exchange
    Exchange {
        /// Question text
        question: String,
        /// Answer text
        answer: String,
        /// When the answer was received (seconds since Unix epoch)
        timestamp: u64,
    },
}

impl LogRecord {
    /// Short tag naming the record variant (used by sinks)
    pub fn tag(&self) -> &'static str {
        match self {
            LogRecord::DocumentProcessed { .. } => "document_processed",
            LogRecord::DocumentPages { .. } => "document_pages",
            LogRecord::Exchange { .. } => "exchange",
        }
    }
}
