//! Coordinator tests
//!
//! These drive the coordinator with the mock extractor and an in-memory
//! sink, covering per-file isolation, gating, progress, cancellation and
//! the bounded worker pool.

use crate::{CancelFlag, IngestConfig, IngestFile, IngestOptions, IngestionCoordinator};
use docqa_domain::{ExtractionStatus, FailureKind, LogRecord};
use docqa_extract::MockExtractor;
use docqa_report::{batch_summary, MemorySink};
use docqa_store::DocumentStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type TestCoordinator = IngestionCoordinator<MockExtractor, MemorySink>;

fn setup(
    extractor: MockExtractor,
    config: IngestConfig,
) -> (TestCoordinator, Arc<Mutex<DocumentStore>>, MemorySink) {
    let store = Arc::new(Mutex::new(DocumentStore::new()));
    let sink = MemorySink::new();
    let coordinator =
        IngestionCoordinator::new(extractor, store.clone(), sink.clone(), config).unwrap();
    (coordinator, store, sink)
}

fn file(name: &str, content: &str) -> IngestFile {
    IngestFile::new(name, content.as_bytes().to_vec())
}

#[tokio::test]
async fn test_unsupported_middle_file_does_not_abort_batch() {
    let (coordinator, store, _) = setup(MockExtractor::default(), IngestConfig::default());

    let files = vec![
        file("one.txt", "first"),
        file("two.xyz", "middle"),
        file("three.txt", "last"),
    ];
    let batch = coordinator
        .ingest_batch(files, IngestOptions::default())
        .await
        .unwrap();

    let store = store.lock().unwrap();
    let summary = batch_summary(&store, &batch).unwrap();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.pending, 0);
    assert_eq!(summary.failures[0].kind, FailureKind::UnsupportedType);
    assert_eq!(summary.failures[0].filename, "two.xyz");

    assert!(store.get(batch.ids()[0]).unwrap().is_succeeded());
    assert!(store.get(batch.ids()[2]).unwrap().is_succeeded());
}

#[tokio::test]
async fn test_extraction_failure_is_isolated() {
    let mut extractor = MockExtractor::default();
    extractor.add_error("corrupt bytes");
    let (coordinator, store, _) = setup(extractor, IngestConfig::default());

    let files = vec![
        file("good1.txt", "fine"),
        file("bad.txt", "corrupt bytes"),
        file("good2.txt", "also fine"),
    ];
    let batch = coordinator
        .ingest_batch(files, IngestOptions::default())
        .await
        .unwrap();

    let store = store.lock().unwrap();
    let summary = batch_summary(&store, &batch).unwrap();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].kind, FailureKind::Extraction);
}

#[tokio::test]
async fn test_counts_always_sum_to_batch_size() {
    let (coordinator, store, _) = setup(MockExtractor::default(), IngestConfig::default());

    let files = vec![file("a.txt", "a"), file("b.xyz", "b"), file("c.txt", "c")];
    let batch = coordinator
        .ingest_batch(files, IngestOptions::default())
        .await
        .unwrap();

    let store = store.lock().unwrap();
    let summary = batch_summary(&store, &batch).unwrap();
    assert_eq!(
        summary.succeeded + summary.failed + summary.pending,
        batch.len()
    );
}

#[tokio::test]
async fn test_progress_events_in_submission_order() {
    let (coordinator, _, _) = setup(MockExtractor::default(), IngestConfig::default());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let files = vec![file("a.txt", "a"), file("b.txt", "b"), file("c.txt", "c")];
    let options = IngestOptions {
        progress: Some(tx),
        ..IngestOptions::default()
    };
    coordinator.ingest_batch(files, options).await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 3);
    let names: Vec<_> = events.iter().map(|e| e.filename.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    let completed: Vec<_> = events.iter().map(|e| e.completed).collect();
    assert_eq!(completed, vec![1, 2, 3]);
    assert!(events.iter().all(|e| e.total == 3));
    assert!((events[2].fraction() - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_oversize_requires_confirmation() {
    let config = IngestConfig {
        confirm_threshold_bytes: 4,
        ..IngestConfig::default()
    };
    let (coordinator, store, _) = setup(MockExtractor::default(), config.clone());

    // Unconfirmed oversize file fails; the batch continues
    let batch = coordinator
        .ingest_batch(
            vec![file("big.txt", "well over four bytes")],
            IngestOptions::default(),
        )
        .await
        .unwrap();
    {
        let store = store.lock().unwrap();
        let doc = store.get(batch.ids()[0]).unwrap();
        let (kind, _) = doc.failure().unwrap();
        assert_eq!(kind, FailureKind::OversizeUnconfirmed);
    }

    // Resubmitting with confirmation (and replace intent) succeeds
    let mut confirmed = HashSet::new();
    confirmed.insert("big.txt".to_string());
    let options = IngestOptions {
        confirmed,
        replace_existing: true,
        ..IngestOptions::default()
    };
    let batch = coordinator
        .ingest_batch(vec![file("big.txt", "well over four bytes")], options)
        .await
        .unwrap();

    let store = store.lock().unwrap();
    assert!(store.get(batch.ids()[0]).unwrap().is_succeeded());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_hard_size_cap_rejects_outright() {
    let config = IngestConfig {
        max_file_bytes: 8,
        confirm_threshold_bytes: 4,
        ..IngestConfig::default()
    };
    let (coordinator, store, _) = setup(MockExtractor::default(), config);

    // Confirmation does not override the hard cap
    let mut confirmed = HashSet::new();
    confirmed.insert("huge.txt".to_string());
    let options = IngestOptions {
        confirmed,
        ..IngestOptions::default()
    };
    let batch = coordinator
        .ingest_batch(vec![file("huge.txt", "far beyond the cap")], options)
        .await
        .unwrap();

    let store = store.lock().unwrap();
    let (kind, _) = store.get(batch.ids()[0]).unwrap().failure().unwrap();
    assert_eq!(kind, FailureKind::TooLarge);
}

#[tokio::test]
async fn test_already_ingested_file_is_skipped() {
    let extractor = MockExtractor::default();
    let (coordinator, store, _) = setup(extractor.clone(), IngestConfig::default());

    let first = coordinator
        .ingest_batch(vec![file("a.txt", "content")], IngestOptions::default())
        .await
        .unwrap();
    let second = coordinator
        .ingest_batch(vec![file("a.txt", "content")], IngestOptions::default())
        .await
        .unwrap();

    // Same document referenced, no second extraction
    assert_eq!(first.ids(), second.ids());
    assert_eq!(extractor.call_count(), 1);
    assert_eq!(store.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_replace_existing_reprocesses() {
    let mut extractor = MockExtractor::default();
    extractor.add_pages("v1", vec!["old".into()]);
    extractor.add_pages("v2", vec!["new".into()]);
    let (coordinator, store, _) = setup(extractor.clone(), IngestConfig::default());

    coordinator
        .ingest_batch(vec![file("a.txt", "v1")], IngestOptions::default())
        .await
        .unwrap();
    let options = IngestOptions {
        replace_existing: true,
        ..IngestOptions::default()
    };
    let batch = coordinator
        .ingest_batch(vec![file("a.txt", "v2")], options)
        .await
        .unwrap();

    let store = store.lock().unwrap();
    assert_eq!(store.len(), 1);
    let doc = store.get(batch.ids()[0]).unwrap();
    assert_eq!(doc.pages(), &["new".to_string()]);
    assert_eq!(extractor.call_count(), 2);
}

#[tokio::test]
async fn test_cancelled_batch_leaves_members_pending() {
    let extractor = MockExtractor::default();
    let (coordinator, store, _) = setup(extractor.clone(), IngestConfig::default());

    let cancel = CancelFlag::new();
    cancel.cancel();
    let options = IngestOptions {
        cancel: Some(cancel),
        ..IngestOptions::default()
    };

    let batch = coordinator
        .ingest_batch(vec![file("a.txt", "a"), file("b.txt", "b")], options)
        .await
        .unwrap();

    // Membership is fixed but nothing was extracted
    assert_eq!(batch.len(), 2);
    assert_eq!(extractor.call_count(), 0);
    let store = store.lock().unwrap();
    for &id in batch.ids() {
        assert_eq!(store.get(id).unwrap().status(), &ExtractionStatus::Pending);
    }
}

#[tokio::test]
async fn test_worker_pool_preserves_isolation_and_monotonic_progress() {
    let mut extractor = MockExtractor::default();
    extractor.add_error("bad");
    let config = IngestConfig {
        concurrency: 4,
        ..IngestConfig::default()
    };
    let (coordinator, store, _) = setup(extractor, config);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let files: Vec<_> = (0..6)
        .map(|i| {
            if i == 3 {
                file("f3.txt", "bad")
            } else {
                file(&format!("f{}.txt", i), "ok")
            }
        })
        .collect();
    let options = IngestOptions {
        progress: Some(tx),
        ..IngestOptions::default()
    };
    let batch = coordinator.ingest_batch(files, options).await.unwrap();

    let store = store.lock().unwrap();
    let summary = batch_summary(&store, &batch).unwrap();
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 1);

    // Completed counts cover 1..=6 exactly, regardless of completion order
    let mut completed = Vec::new();
    while let Ok(event) = rx.try_recv() {
        completed.push(event.completed);
    }
    completed.sort_unstable();
    assert_eq!(completed, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_activity_log_records_successes_only() {
    let mut extractor = MockExtractor::default();
    extractor.add_pages("good", vec!["p1".into(), "p2".into()]);
    extractor.add_error("bad");
    let (coordinator, _, sink) = setup(extractor, IngestConfig::default());

    coordinator
        .ingest_batch(
            vec![file("good.txt", "good"), file("bad.txt", "bad")],
            IngestOptions::default(),
        )
        .await
        .unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 2);
    match &records[0] {
        LogRecord::DocumentPages { filename, pages } => {
            assert_eq!(filename, "good.txt");
            assert_eq!(pages.len(), 2);
        }
        other => panic!("expected DocumentPages, got {:?}", other),
    }
    match &records[1] {
        LogRecord::DocumentProcessed {
            filename,
            page_count,
            ..
        } => {
            assert_eq!(filename, "good.txt");
            assert_eq!(*page_count, 2);
        }
        other => panic!("expected DocumentProcessed, got {:?}", other),
    }
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let store = Arc::new(Mutex::new(DocumentStore::new()));
    let config = IngestConfig {
        concurrency: 0,
        ..IngestConfig::default()
    };
    let result =
        IngestionCoordinator::new(MockExtractor::default(), store, MemorySink::new(), config);
    assert!(result.is_err());
}
