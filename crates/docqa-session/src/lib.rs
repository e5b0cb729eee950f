//! docqa Session Facade
//!
//! One [`Session`] owns everything a document Q&A conversation needs: the
//! in-memory document store, the ingestion coordinator, the query router and
//! the append-only query history. Components share the store through the
//! session instead of reaching for ambient state, and dropping the session
//! discards every document it held.
//!
//! # Example
//!
//! ```
//! use docqa_extract::MockExtractor;
//! use docqa_ingest::{IngestFile, IngestOptions};
//! use docqa_llm::MockAnswerer;
//! use docqa_report::MemorySink;
//! use docqa_session::{Session, SessionConfig};
//!
//! # tokio_test::block_on(async {
//! let mut session = Session::new(
//!     MockExtractor::default(),
//!     MockAnswerer::new("42, per notes.txt"),
//!     MemorySink::new(),
//!     SessionConfig::default(),
//! ).unwrap();
//!
//! let batch = session
//!     .ingest(
//!         vec![IngestFile::new("notes.txt", b"the answer is 42".to_vec())],
//!         IngestOptions::default(),
//!     )
//!     .await
//!     .unwrap();
//! assert!(session.summary(&batch).unwrap().is_complete());
//!
//! let result = session.ask_all("what is the answer?").await.unwrap();
//! assert_eq!(result.answer, "42, per notes.txt");
//! assert_eq!(session.history().len(), 1);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;

use docqa_domain::traits::{AnsweringService, LogSink, TextExtractor};
use docqa_domain::{Batch, DocumentId, LogRecord, QueryRequest, QueryResult};
use docqa_ingest::{IngestFile, IngestOptions, IngestionCoordinator};
use docqa_query::QueryRouter;
use docqa_report::{batch_summary, BatchSummary, ExportFormat, HistoryLog};
use docqa_store::{DocumentStore, StoreStats};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub use config::{SessionConfig, DEFAULT_MODEL};
pub use error::SessionError;

/// Unique identifier for a session based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// One document Q&A session
///
/// Created at session start, dropped at session end; document contents do
/// not outlive it. The history log records answered queries only: a failed
/// query returns an error and leaves the history untouched.
pub struct Session<E, A, L>
where
    E: TextExtractor,
    A: AnsweringService,
    L: LogSink,
{
    id: SessionId,
    store: Arc<Mutex<DocumentStore>>,
    coordinator: IngestionCoordinator<E, L>,
    router: QueryRouter<A>,
    log: Arc<Mutex<L>>,
    history: HistoryLog,
    config: SessionConfig,
}

impl<E, A, L> Session<E, A, L>
where
    E: TextExtractor + Send + Sync + 'static,
    E::Error: fmt::Display + Send,
    A: AnsweringService + Send + Sync + 'static,
    A::Error: fmt::Display + Send,
    L: LogSink + Send + 'static,
    L::Error: fmt::Display,
{
    /// Start a session with the given collaborators
    pub fn new(
        extractor: E,
        answerer: A,
        sink: L,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::Config)?;
        let store = Arc::new(Mutex::new(DocumentStore::new()));
        // The coordinator and the query side append to the same sink
        let log = Arc::new(Mutex::new(sink));
        let coordinator = IngestionCoordinator::with_shared_log(
            extractor,
            store.clone(),
            log.clone(),
            config.ingest.clone(),
        )?;
        let router = QueryRouter::new(answerer, store.clone(), config.query.clone())?;

        let id = SessionId::new();
        info!("Session {} started", id);
        Ok(Self {
            id,
            store,
            coordinator,
            router,
            log,
            history: HistoryLog::new(),
            config,
        })
    }

    /// This session's identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The configuration this session was started with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Ingest a batch of files
    pub async fn ingest(
        &self,
        files: Vec<IngestFile>,
        options: IngestOptions,
    ) -> Result<Batch, SessionError> {
        Ok(self.coordinator.ingest_batch(files, options).await?)
    }

    /// Answer a question
    ///
    /// An empty model on the request is filled from the session default.
    /// The result is appended to the history; failed queries are not.
    pub async fn ask(&mut self, mut request: QueryRequest) -> Result<QueryResult, SessionError> {
        if request.model.is_empty() {
            request.model = self.config.default_model.clone();
        }
        let result = self.router.ask(request).await?;
        self.append_exchange(&result);
        self.history.append(result.clone());
        Ok(result)
    }

    /// Answer a question over all successfully extracted documents
    pub async fn ask_all(&mut self, question: &str) -> Result<QueryResult, SessionError> {
        self.ask(QueryRequest::multi(question, Vec::new(), "")).await
    }

    /// Summarize a batch's current state
    pub fn summary(&self, batch: &Batch) -> Result<BatchSummary, SessionError> {
        let store = self.lock_store()?;
        Ok(batch_summary(&store, batch)?)
    }

    /// Answered queries, oldest first
    pub fn history(&self) -> &[QueryResult] {
        self.history.entries()
    }

    /// Aggregate statistics over the session's documents
    pub fn stats(&self) -> Result<StoreStats, SessionError> {
        Ok(self.lock_store()?.stats())
    }

    /// Look up a document id by filename
    pub fn find_document(&self, filename: &str) -> Result<Option<DocumentId>, SessionError> {
        Ok(self.lock_store()?.find_by_filename(filename))
    }

    /// Ids and filenames of all successfully extracted documents, in
    /// ingestion order
    pub fn succeeded_documents(&self) -> Result<Vec<(DocumentId, String)>, SessionError> {
        let store = self.lock_store()?;
        Ok(store
            .iter_succeeded()
            .map(|d| (d.id(), d.filename().to_string()))
            .collect())
    }

    /// Render one succeeded document's extracted text in the given format
    pub fn export(&self, id: DocumentId, format: ExportFormat) -> Result<String, SessionError> {
        let store = self.lock_store()?;
        let doc = store.get(id).map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(docqa_report::export::render(doc, format, unix_now())?)
    }

    /// Record one answered query on the activity log
    ///
    /// A sink failure is logged and swallowed: the answer already exists and
    /// is still returned to the caller.
    fn append_exchange(&self, result: &QueryResult) {
        let record = LogRecord::Exchange {
            question: result.question.clone(),
            answer: result.answer.clone(),
            timestamp: result.asked_at,
        };
        match self.log.lock() {
            Ok(mut log) => {
                if let Err(e) = log.append(&record) {
                    warn!("Activity log append failed: {}", e);
                }
            }
            Err(e) => warn!("Activity log lock poisoned: {}", e),
        }
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, DocumentStore>, SessionError> {
        self.store
            .lock()
            .map_err(|e| SessionError::Store(format!("store lock poisoned: {}", e)))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
