//! Query module - questions over the session's documents and their answers

use crate::DocumentId;

/// How the context for a question is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Context is the full text of exactly one document
    Single,
    /// Context spans the selected documents (or all succeeded ones)
    Multi,
}

/// One question posed by the user
///
/// For `Single` mode exactly one document must be selected and it must have
/// status `Succeeded`; the router enforces both before dispatching. The model
/// identifier is explicit per request rather than a mutable session-wide
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Question text
    pub question: String,
    /// Context assembly mode
    pub mode: QueryMode,
    /// Selected document ids (one for `Single`; empty in `Multi` means all
    /// succeeded documents)
    pub documents: Vec<DocumentId>,
    /// Answering model identifier
    pub model: String,
}

impl QueryRequest {
    /// Build a single-document request
    pub fn single(
        question: impl Into<String>,
        document: DocumentId,
        model: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            mode: QueryMode::Single,
            documents: vec![document],
            model: model.into(),
        }
    }

    /// Build a multi-document request
    ///
    /// An empty selection means "all succeeded documents".
    pub fn multi(
        question: impl Into<String>,
        documents: Vec<DocumentId>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            mode: QueryMode::Multi,
            documents,
            model: model.into(),
        }
    }
}

/// The recorded answer for a [`QueryRequest`]
///
/// Created by the query router after the answering collaborator responds,
/// appended to the append-only history log, never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Original question text
    pub question: String,
    /// Answer text from the collaborator
    pub answer: String,
    /// Documents that contributed context (citation hints)
    pub citations: Vec<DocumentId>,
    /// Model that produced the answer
    pub model: String,
    /// When the answer was received (seconds since Unix epoch)
    pub asked_at: u64,
}
