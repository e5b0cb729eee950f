//! Core ingestion coordinator implementation

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::progress::{CancelFlag, ProgressEvent};
use docqa_domain::traits::{LogSink, TextExtractor};
use docqa_domain::{Batch, Document, DocumentId, FailureKind, FileKind, LogRecord};
use docqa_store::DocumentStore;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// One raw file payload submitted for ingestion
#[derive(Debug, Clone)]
pub struct IngestFile {
    /// Original filename (used for type detection and duplicate checks)
    pub filename: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl IngestFile {
    /// Create a file payload
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Per-batch options for [`IngestionCoordinator::ingest_batch`]
#[derive(Debug, Default)]
pub struct IngestOptions {
    /// Filenames the caller has explicitly confirmed despite exceeding the
    /// oversize threshold
    pub confirmed: HashSet<String>,

    /// Replace an already-ingested document sharing a filename instead of
    /// skipping the file
    pub replace_existing: bool,

    /// Channel for incremental progress events
    pub progress: Option<UnboundedSender<ProgressEvent>>,

    /// Cooperative cancellation flag
    pub cancel: Option<CancelFlag>,
}

/// The ingestion coordinator processes batches of raw files into documents
///
/// Contract: every file is processed independently; a single failure never
/// aborts the batch. Each file's outcome is recorded on its document in the
/// store, and a progress event is emitted as each file completes.
///
/// With `concurrency = 1` (the default) files are extracted strictly in
/// submission order, one fully before the next. Higher values run a bounded
/// worker pool; per-file isolation and a monotonic completed count are
/// preserved, but progress events arrive in completion order.
pub struct IngestionCoordinator<E, L>
where
    E: TextExtractor,
    L: LogSink,
{
    extractor: Arc<E>,
    store: Arc<Mutex<DocumentStore>>,
    log: Arc<Mutex<L>>,
    config: IngestConfig,
}

impl<E, L> IngestionCoordinator<E, L>
where
    E: TextExtractor + Send + Sync + 'static,
    E::Error: std::fmt::Display + Send,
    L: LogSink + Send + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new coordinator over a shared store
    pub fn new(
        extractor: E,
        store: Arc<Mutex<DocumentStore>>,
        log: L,
        config: IngestConfig,
    ) -> Result<Self, IngestError> {
        Self::with_shared_log(extractor, store, Arc::new(Mutex::new(log)), config)
    }

    /// Create a coordinator that appends to an existing activity-log handle
    ///
    /// Lets the session hand the same sink to the coordinator and to its own
    /// query-side records.
    pub fn with_shared_log(
        extractor: E,
        store: Arc<Mutex<DocumentStore>>,
        log: Arc<Mutex<L>>,
        config: IngestConfig,
    ) -> Result<Self, IngestError> {
        config.validate().map_err(IngestError::Config)?;
        Ok(Self {
            extractor: Arc::new(extractor),
            store,
            log,
            config,
        })
    }

    /// Ingest a batch of files
    ///
    /// Returns the batch with one document reference per file, in submission
    /// order. Per-file failures are recorded on the documents, never
    /// returned: the error type covers batch-level conditions only.
    pub async fn ingest_batch(
        &self,
        files: Vec<IngestFile>,
        options: IngestOptions,
    ) -> Result<Batch, IngestError> {
        info!("Starting batch ingestion of {} file(s)", files.len());

        // Register every accepted file as a pending document first, so the
        // batch membership and its order are fixed before extraction starts.
        let mut batch = Batch::new();
        let mut tasks: Vec<(DocumentId, IngestFile)> = Vec::new();
        {
            let mut store = self.lock_store()?;
            for file in files {
                if let Some(existing) = store.find_by_filename(&file.filename) {
                    if !options.replace_existing {
                        debug!("'{}' already ingested, skipping", file.filename);
                        batch.push(existing);
                        continue;
                    }
                }
                let doc = Document::new(&file.filename, unix_now());
                let id = if options.replace_existing {
                    store.put_replacing(doc)
                } else {
                    store.put(doc).map_err(|e| IngestError::Store(e.to_string()))?
                };
                batch.push(id);
                tasks.push((id, file));
            }
        }

        let total = tasks.len();
        if self.config.concurrency <= 1 {
            self.run_sequential(tasks, total, &options).await;
        } else {
            self.run_pooled(tasks, total, &options).await?;
        }

        Ok(batch)
    }

    async fn run_sequential(
        &self,
        tasks: Vec<(DocumentId, IngestFile)>,
        total: usize,
        options: &IngestOptions,
    ) {
        let confirmed = Arc::new(options.confirmed.clone());
        let mut completed = 0usize;

        for (id, file) in tasks {
            if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
                info!("Batch abandoned after {} of {} file(s)", completed, total);
                break;
            }
            let filename = file.filename.clone();
            Self::process_file(
                self.extractor.clone(),
                self.store.clone(),
                self.log.clone(),
                self.config.clone(),
                confirmed.clone(),
                id,
                file,
            )
            .await;
            completed += 1;
            emit_progress(&options.progress, completed, total, filename);
        }
    }

    async fn run_pooled(
        &self,
        tasks: Vec<(DocumentId, IngestFile)>,
        total: usize,
        options: &IngestOptions,
    ) -> Result<(), IngestError> {
        let confirmed = Arc::new(options.confirmed.clone());
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut workers: JoinSet<()> = JoinSet::new();

        for (id, file) in tasks {
            if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
                info!(
                    "Batch abandoned after {} of {} file(s)",
                    completed.load(Ordering::SeqCst),
                    total
                );
                break;
            }
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| IngestError::Worker(e.to_string()))?;

            let extractor = self.extractor.clone();
            let store = self.store.clone();
            let log = self.log.clone();
            let config = self.config.clone();
            let confirmed = confirmed.clone();
            let progress = options.progress.clone();
            let completed = completed.clone();

            workers.spawn(async move {
                let _permit = permit;
                let filename = file.filename.clone();
                Self::process_file(extractor, store, log, config, confirmed, id, file).await;
                // fetch_add makes the completed count monotonic across workers
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                emit_progress(&progress, done, total, filename);
            });
        }

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                warn!("Ingestion worker failed: {}", e);
            }
        }
        Ok(())
    }

    /// Process one file to a terminal status; never returns an error
    async fn process_file(
        extractor: Arc<E>,
        store: Arc<Mutex<DocumentStore>>,
        log: Arc<Mutex<L>>,
        config: IngestConfig,
        confirmed: Arc<HashSet<String>>,
        id: DocumentId,
        file: IngestFile,
    ) {
        let IngestFile { filename, bytes } = file;

        let kind = match FileKind::from_filename(&filename) {
            Some(kind) if config.allows(kind) => kind,
            Some(kind) => {
                fail_document(
                    &store,
                    id,
                    FailureKind::UnsupportedType,
                    format!("file type '{}' is not in the allowlist", kind),
                );
                return;
            }
            None => {
                fail_document(
                    &store,
                    id,
                    FailureKind::UnsupportedType,
                    format!("unrecognized extension on '{}'", filename),
                );
                return;
            }
        };

        if bytes.len() > config.max_file_bytes {
            fail_document(
                &store,
                id,
                FailureKind::TooLarge,
                format!(
                    "{} bytes exceeds the {} byte cap",
                    bytes.len(),
                    config.max_file_bytes
                ),
            );
            return;
        }

        if bytes.len() > config.confirm_threshold_bytes && !confirmed.contains(&filename) {
            fail_document(
                &store,
                id,
                FailureKind::OversizeUnconfirmed,
                format!(
                    "{} bytes exceeds the {} byte confirmation threshold; \
                     resubmit with confirmation to proceed",
                    bytes.len(),
                    config.confirm_threshold_bytes
                ),
            );
            return;
        }

        debug!("Extracting '{}' ({} bytes, kind {})", filename, bytes.len(), kind);

        let extraction = timeout(
            config.extract_timeout(),
            call_extractor(extractor, bytes, kind),
        )
        .await;

        match extraction {
            Err(_) => {
                fail_document(
                    &store,
                    id,
                    FailureKind::Extraction,
                    format!(
                        "extraction timed out after {}s",
                        config.extract_timeout_secs
                    ),
                );
            }
            Ok(Err(reason)) => {
                fail_document(&store, id, FailureKind::Extraction, reason);
            }
            Ok(Ok(pages)) => {
                let page_count = pages.len();
                {
                    let mut store = match store.lock() {
                        Ok(store) => store,
                        Err(e) => {
                            warn!("Store lock poisoned while completing '{}': {}", filename, e);
                            return;
                        }
                    };
                    if let Err(e) = store.complete(id, pages.clone()) {
                        warn!("Could not complete '{}': {}", filename, e);
                        return;
                    }
                }
                append_records(
                    &log,
                    &[
                        LogRecord::DocumentPages {
                            filename: filename.clone(),
                            pages,
                        },
                        LogRecord::DocumentProcessed {
                            filename: filename.clone(),
                            page_count,
                            timestamp: unix_now(),
                        },
                    ],
                );
                info!("Extracted '{}': {} page(s)", filename, page_count);
            }
        }
    }

    fn lock_store(&self) -> Result<std::sync::MutexGuard<'_, DocumentStore>, IngestError> {
        self.store
            .lock()
            .map_err(|e| IngestError::Store(format!("store lock poisoned: {}", e)))
    }
}

/// Run the (blocking) extractor call off the async runtime
async fn call_extractor<E>(extractor: Arc<E>, bytes: Vec<u8>, kind: FileKind) -> Result<Vec<String>, String>
where
    E: TextExtractor + Send + Sync + 'static,
    E::Error: std::fmt::Display + Send,
{
    tokio::task::spawn_blocking(move || {
        extractor
            .extract(&bytes, kind)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("extraction task failed: {}", e))?
}

fn fail_document(
    store: &Arc<Mutex<DocumentStore>>,
    id: DocumentId,
    kind: FailureKind,
    reason: String,
) {
    warn!("Document {} failed ({}): {}", id, kind, reason);
    match store.lock() {
        Ok(mut store) => {
            if let Err(e) = store.fail(id, kind, reason) {
                warn!("Could not record failure for {}: {}", id, e);
            }
        }
        Err(e) => warn!("Store lock poisoned while failing {}: {}", id, e),
    }
}

fn append_records<L>(log: &Arc<Mutex<L>>, records: &[LogRecord])
where
    L: LogSink,
    L::Error: std::fmt::Display,
{
    match log.lock() {
        Ok(mut log) => {
            for record in records {
                if let Err(e) = log.append(record) {
                    warn!("Activity log append failed: {}", e);
                }
            }
        }
        Err(e) => warn!("Activity log lock poisoned: {}", e),
    }
}

fn emit_progress(
    progress: &Option<UnboundedSender<ProgressEvent>>,
    completed: usize,
    total: usize,
    filename: String,
) {
    if let Some(sender) = progress {
        // A dropped receiver just means nobody is watching
        let _ = sender.send(ProgressEvent {
            completed,
            total,
            filename,
        });
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
