//! Batch summary aggregation

use crate::ReportError;
use docqa_domain::{Batch, ExtractionStatus, FailureKind};
use docqa_store::DocumentStore;

/// One failed document in a batch summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureEntry {
    /// Original filename
    pub filename: String,
    /// Failure taxonomy kind
    pub kind: FailureKind,
    /// Human-readable reason
    pub reason: String,
}

/// Aggregated status counts for one batch
///
/// Counts are computed from member document statuses at call time, so
/// `succeeded + failed + pending == total` holds at every observation point
/// during processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Batch size
    pub total: usize,
    /// Documents that reached `Succeeded`
    pub succeeded: usize,
    /// Documents that reached `Failed`
    pub failed: usize,
    /// Documents still pending
    pub pending: usize,
    /// Failure details, in submission order
    pub failures: Vec<FailureEntry>,
}

impl BatchSummary {
    /// Whether every member reached a terminal status
    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }

    /// One-line human-readable rendering
    pub fn line(&self) -> String {
        format!(
            "{} document(s): {} succeeded, {} failed, {} pending",
            self.total, self.succeeded, self.failed, self.pending
        )
    }
}

/// Summarize a batch against the store
///
/// Pure read: neither the batch nor any document is mutated.
pub fn batch_summary(store: &DocumentStore, batch: &Batch) -> Result<BatchSummary, ReportError> {
    let mut summary = BatchSummary {
        total: batch.len(),
        succeeded: 0,
        failed: 0,
        pending: 0,
        failures: Vec::new(),
    };

    for &id in batch.ids() {
        let doc = store
            .get(id)
            .map_err(|_| ReportError::UnknownDocument(id.to_string()))?;
        match doc.status() {
            ExtractionStatus::Succeeded => summary.succeeded += 1,
            ExtractionStatus::Pending => summary.pending += 1,
            ExtractionStatus::Failed { kind, reason } => {
                summary.failed += 1;
                summary.failures.push(FailureEntry {
                    filename: doc.filename().to_string(),
                    kind: *kind,
                    reason: reason.clone(),
                });
            }
        }
    }

    Ok(summary)
}
