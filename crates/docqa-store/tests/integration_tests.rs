//! Integration tests for docqa-store
//!
//! These tests verify the full document lifecycle: insert, terminal
//! transitions, ordered iteration, and derived statistics.

use docqa_domain::{Document, ExtractionStatus, FailureKind};
use docqa_store::{DocumentStore, StoreError};

#[test]
fn test_put_and_get_document() {
    let mut store = DocumentStore::new();
    let doc = Document::new("contract.pdf", 1000);
    let id = doc.id();

    let result = store.put(doc);
    assert!(result.is_ok(), "Should insert document successfully");
    assert_eq!(result.unwrap(), id);

    let retrieved = store.get(id).unwrap();
    assert_eq!(retrieved.filename(), "contract.pdf");
    assert_eq!(retrieved.status(), &ExtractionStatus::Pending);
}

#[test]
fn test_duplicate_filename_rejected() {
    let mut store = DocumentStore::new();
    store.put(Document::new("report.docx", 1000)).unwrap();

    // A differently-sourced document sharing the filename must be rejected
    let result = store.put(Document::new("report.docx", 2000));
    assert!(matches!(result, Err(StoreError::Duplicate { .. })));
}

#[test]
fn test_put_replacing_keeps_position() {
    let mut store = DocumentStore::new();
    store.put(Document::new("a.txt", 0)).unwrap();
    store.put(Document::new("b.txt", 0)).unwrap();
    store.put(Document::new("c.txt", 0)).unwrap();

    let replacement = Document::new("b.txt", 10);
    let new_id = store.put_replacing(replacement);

    let names: Vec<_> = store.iter().map(|d| d.filename().to_string()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(store.len(), 3);
    assert_eq!(store.find_by_filename("b.txt"), Some(new_id));
}

#[test]
fn test_complete_then_immutable() {
    let mut store = DocumentStore::new();
    let id = store.put(Document::new("scan.pdf", 0)).unwrap();

    store
        .complete(id, vec!["page 1".into(), "page 2".into()])
        .unwrap();

    let doc = store.get(id).unwrap();
    assert!(doc.is_succeeded());
    assert_eq!(doc.page_count(), 2);

    // Terminal documents reject further transitions
    let again = store.complete(id, vec!["other".into()]);
    assert!(matches!(again, Err(StoreError::InvalidTransition(_))));
    let fail = store.fail(id, FailureKind::Extraction, "late");
    assert!(matches!(fail, Err(StoreError::InvalidTransition(_))));
}

#[test]
fn test_iter_succeeded_is_ordered_and_restartable() {
    let mut store = DocumentStore::new();
    let a = store.put(Document::new("a.txt", 0)).unwrap();
    let b = store.put(Document::new("b.txt", 0)).unwrap();
    let c = store.put(Document::new("c.txt", 0)).unwrap();

    store.complete(a, vec!["aa".into()]).unwrap();
    store.fail(b, FailureKind::UnsupportedType, "bad type").unwrap();
    store.complete(c, vec!["cc".into()]).unwrap();

    let first: Vec<_> = store.iter_succeeded().map(|d| d.id()).collect();
    assert_eq!(first, vec![a, c]);

    // Restartable: a second pass sees exactly the same sequence
    let second: Vec<_> = store.iter_succeeded().map(|d| d.id()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_stats_are_derived() {
    let mut store = DocumentStore::new();
    let a = store.put(Document::new("a.txt", 0)).unwrap();
    let b = store.put(Document::new("b.txt", 0)).unwrap();
    store.complete(a, vec!["one".into(), "two".into()]).unwrap();
    store.complete(b, vec!["three".into()]).unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_documents, 2);
    assert_eq!(stats.total_pages, 3);
    assert_eq!(stats.total_characters, "onetwothree".len());
}
