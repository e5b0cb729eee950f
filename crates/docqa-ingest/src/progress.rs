//! Progress reporting and cancellation for batch ingestion

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Emitted after each file in a batch reaches a terminal status
///
/// The completed count is monotonic: it never regresses, including under
/// concurrent extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Files completed so far (including this one)
    pub completed: usize,
    /// Total files in the batch
    pub total: usize,
    /// Filename that just completed
    pub filename: String,
}

impl ProgressEvent {
    /// Fraction of the batch completed, in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Cooperative cancellation flag for a batch in progress
///
/// Cancellation is checked between files: the in-flight file always runs to
/// completion and its document remains valid.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, un-cancelled flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abandonment of the batch
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Whether abandonment was requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let event = ProgressEvent {
            completed: 1,
            total: 4,
            filename: "a.txt".into(),
        };
        assert!((event.fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_of_empty_batch_is_complete() {
        let event = ProgressEvent {
            completed: 0,
            total: 0,
            filename: String::new(),
        };
        assert!((event.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_flag_shared_across_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());

        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
