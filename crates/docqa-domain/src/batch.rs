//! Batch module - an ordered set of documents submitted together

use crate::DocumentId;

/// An ordered set of documents submitted together for extraction
///
/// The batch only holds document references in submission order; statuses
/// and counts live on the documents themselves (in the store) so that
/// batch-level counts can never drift from member statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    documents: Vec<DocumentId>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document reference (submission order)
    pub fn push(&mut self, id: DocumentId) {
        self.documents.push(id);
    }

    /// Member document ids in submission order
    pub fn ids(&self) -> &[DocumentId] {
        &self.documents
    }

    /// Number of member documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch has no members
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<DocumentId> for Batch {
    fn from_iter<T: IntoIterator<Item = DocumentId>>(iter: T) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_submission_order() {
        let ids: Vec<DocumentId> = (1..=3).map(DocumentId::from_value).collect();
        let mut batch = Batch::new();
        for id in &ids {
            batch.push(*id);
        }

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.ids(), ids.as_slice());
    }

    #[test]
    fn test_batch_from_iterator() {
        let batch: Batch = (1..=5).map(DocumentId::from_value).collect();
        assert_eq!(batch.len(), 5);
        assert!(!batch.is_empty());
    }
}
