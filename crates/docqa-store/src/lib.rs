//! docqa Storage Layer
//!
//! In-memory, session-scoped registry of documents. There is deliberately no
//! cross-session persistence: document contents are discarded when the
//! session ends, and aggregate statistics are derived on demand rather than
//! stored, so they can never drift from member documents.
//!
//! # Write policy
//!
//! The ingestion coordinator is the only writer. It inserts pending
//! documents with [`DocumentStore::put`] and drives them to a terminal
//! status with [`DocumentStore::complete`] or [`DocumentStore::fail`].
//! Readers (query router, reporter) only observe.
//!
//! # Examples
//!
//! ```
//! use docqa_domain::Document;
//! use docqa_store::DocumentStore;
//!
//! let mut store = DocumentStore::new();
//! let id = store.put(Document::new("notes.txt", 0)).unwrap();
//! store.complete(id, vec!["hello".into()]).unwrap();
//! assert_eq!(store.stats().total_pages, 1);
//! ```

#![warn(missing_docs)]

use docqa_domain::{Document, DocumentId, FailureKind};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the given id
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// A differently-sourced document already uses this filename
    #[error("Duplicate filename: '{filename}' (use put_replacing to replace)")]
    Duplicate {
        /// The colliding filename
        filename: String,
    },

    /// Attempted to mutate a document past its terminal status
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Derived aggregate statistics over the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Number of documents (any status)
    pub total_documents: usize,
    /// Total extracted pages across succeeded documents
    pub total_pages: usize,
    /// Total extracted characters across succeeded documents
    pub total_characters: usize,
}

/// In-memory document registry, scoped to one session
///
/// Documents are kept in insertion order so multi-document context assembly
/// and summaries are deterministic.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<DocumentId, Document>,
    order: Vec<DocumentId>,
    by_filename: HashMap<String, DocumentId>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document
    ///
    /// Fails with [`StoreError::Duplicate`] if a different document already
    /// uses the same filename. Re-inserting the same id replaces in place.
    pub fn put(&mut self, document: Document) -> Result<DocumentId, StoreError> {
        let id = document.id();
        if let Some(&existing) = self.by_filename.get(document.filename()) {
            if existing != id {
                return Err(StoreError::Duplicate {
                    filename: document.filename().to_string(),
                });
            }
        }
        self.insert(document);
        Ok(id)
    }

    /// Insert a document, replacing any existing one with the same filename
    ///
    /// The replacement keeps the original insertion position so iteration
    /// order stays stable across re-ingestion of a corrected file.
    pub fn put_replacing(&mut self, document: Document) -> DocumentId {
        let id = document.id();
        if let Some(&existing) = self.by_filename.get(document.filename()) {
            if existing != id {
                self.documents.remove(&existing);
                if let Some(slot) = self.order.iter_mut().find(|o| **o == existing) {
                    *slot = id;
                }
            }
        }
        self.insert(document);
        id
    }

    fn insert(&mut self, document: Document) {
        let id = document.id();
        self.by_filename
            .insert(document.filename().to_string(), id);
        if self.documents.insert(id, document).is_none() && !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Get a document by id
    pub fn get(&self, id: DocumentId) -> Result<&Document, StoreError> {
        self.documents.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Look up a document id by filename
    pub fn find_by_filename(&self, filename: &str) -> Option<DocumentId> {
        self.by_filename.get(filename).copied()
    }

    /// Mark a document's extraction as succeeded with its pages
    pub fn complete(&mut self, id: DocumentId, pages: Vec<String>) -> Result<(), StoreError> {
        let doc = self.documents.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        doc.complete(pages).map_err(StoreError::InvalidTransition)
    }

    /// Mark a document's extraction as failed
    pub fn fail(
        &mut self,
        id: DocumentId,
        kind: FailureKind,
        reason: impl Into<String>,
    ) -> Result<(), StoreError> {
        let doc = self.documents.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        doc.fail(kind, reason).map_err(StoreError::InvalidTransition)
    }

    /// Iterate over all documents in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }

    /// Lazily iterate over succeeded documents in insertion order
    ///
    /// Pure read: the iterator is restartable and consumes nothing.
    pub fn iter_succeeded(&self) -> impl Iterator<Item = &Document> {
        self.iter().filter(|d| d.is_succeeded())
    }

    /// Number of documents in the store
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Derived aggregate statistics (never cached)
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total_documents: self.len(),
            ..StoreStats::default()
        };
        for doc in self.iter_succeeded() {
            stats.total_pages += doc.page_count();
            stats.total_characters += doc.char_count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = DocumentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.stats(), StoreStats::default());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = DocumentStore::new();
        let id = DocumentId::from_value(7);
        assert!(matches!(store.get(id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_stats_ignore_failed_documents() {
        let mut store = DocumentStore::new();
        let ok = store.put(Document::new("a.txt", 0)).unwrap();
        let bad = store.put(Document::new("b.txt", 0)).unwrap();
        store.complete(ok, vec!["12345".into()]).unwrap();
        store.fail(bad, FailureKind::Extraction, "boom").unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_pages, 1);
        assert_eq!(stats.total_characters, 5);
    }
}
