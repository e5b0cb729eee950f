//! Query routing: validation, context assembly, dispatch

use crate::config::QueryConfig;
use crate::context;
use crate::error::QueryError;
use docqa_domain::traits::AnsweringService;
use docqa_domain::{Document, DocumentId, QueryMode, QueryRequest, QueryResult};
use docqa_store::DocumentStore;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info};

/// Routes questions over the session's documents to the answering service
///
/// The router validates the selection against the store, assembles the
/// context, and dispatches exactly one answering call under a timeout. A
/// precondition failure (missing, pending or failed document, empty
/// selection in single mode) returns a typed error before any collaborator
/// call; a dispatch failure is surfaced as-is and never retried.
pub struct QueryRouter<A>
where
    A: AnsweringService,
{
    answerer: Arc<A>,
    store: Arc<Mutex<DocumentStore>>,
    config: QueryConfig,
}

impl<A> QueryRouter<A>
where
    A: AnsweringService + Send + Sync + 'static,
    A::Error: std::fmt::Display + Send,
{
    /// Create a new router over a shared store
    pub fn new(
        answerer: A,
        store: Arc<Mutex<DocumentStore>>,
        config: QueryConfig,
    ) -> Result<Self, QueryError> {
        config.validate().map_err(QueryError::Config)?;
        Ok(Self {
            answerer: Arc::new(answerer),
            store,
            config,
        })
    }

    /// Answer one question
    ///
    /// On success the returned result carries the ids of every document that
    /// contributed context, in the order their sections appeared.
    pub async fn ask(&self, request: QueryRequest) -> Result<QueryResult, QueryError> {
        let (context, citations) = {
            let store = self
                .store
                .lock()
                .map_err(|e| QueryError::Config(format!("store lock poisoned: {}", e)))?;
            self.assemble(&store, &request)?
        };
        debug!(
            "Dispatching {:?} query over {} document(s), {} context char(s)",
            request.mode,
            citations.len(),
            context.chars().count()
        );

        let answerer = self.answerer.clone();
        let question = request.question.clone();
        let model = request.model.clone();
        let call = tokio::task::spawn_blocking(move || {
            answerer
                .answer(&question, &context, &model)
                .map_err(|e| e.to_string())
        });

        let answer = match timeout(self.config.answer_timeout(), call).await {
            Err(_) => {
                return Err(QueryError::AnsweringUnavailable(format!(
                    "no answer within {}s",
                    self.config.answer_timeout_secs
                )))
            }
            Ok(Err(e)) => {
                return Err(QueryError::AnsweringUnavailable(format!(
                    "answering task failed: {}",
                    e
                )))
            }
            Ok(Ok(Err(e))) => return Err(QueryError::AnsweringUnavailable(e)),
            Ok(Ok(Ok(answer))) => answer,
        };

        info!("Answered question over {} document(s)", citations.len());
        Ok(QueryResult {
            question: request.question,
            answer: answer.text,
            citations,
            model: request.model,
            asked_at: unix_now(),
        })
    }

    fn assemble(
        &self,
        store: &DocumentStore,
        request: &QueryRequest,
    ) -> Result<(String, Vec<DocumentId>), QueryError> {
        match request.mode {
            QueryMode::Single => {
                if request.documents.len() != 1 {
                    return Err(QueryError::InvalidSelection(format!(
                        "single-document mode requires exactly one selection, got {}",
                        request.documents.len()
                    )));
                }
                let doc = self.succeeded(store, request.documents[0])?;
                Ok((
                    context::single_context(doc, &self.config),
                    vec![doc.id()],
                ))
            }
            QueryMode::Multi => {
                let docs: Vec<&Document> = if request.documents.is_empty() {
                    store.iter_succeeded().collect()
                } else {
                    request
                        .documents
                        .iter()
                        .map(|&id| self.succeeded(store, id))
                        .collect::<Result<_, _>>()?
                };
                if docs.is_empty() {
                    return Err(QueryError::NoDocuments);
                }
                let ids = docs.iter().map(|d| d.id()).collect();
                Ok((context::multi_context(&docs, &self.config), ids))
            }
        }
    }

    fn succeeded<'s>(
        &self,
        store: &'s DocumentStore,
        id: DocumentId,
    ) -> Result<&'s Document, QueryError> {
        let doc = store.get(id).map_err(|_| QueryError::NotFound(id))?;
        if !doc.is_succeeded() {
            return Err(QueryError::NotReady(doc.filename().to_string()));
        }
        Ok(doc)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
