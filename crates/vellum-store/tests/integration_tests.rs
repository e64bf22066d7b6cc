//! Integration tests for vellum-store
//!
//! These tests exercise the on-disk adapters: SQLite records in a temp file
//! and documents read from a temp directory tree.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use vellum_domain::traits::{ContentFetcher, RecordStore};
use vellum_domain::{DocumentRef, ExtractedMetadata, FetchError, RecordKey, RecordStatus, StoredRecord};
use vellum_store::{FsContentFetcher, SqliteRecordStore, StoreConfig};

fn record(key: &str, language: &str, status: RecordStatus) -> StoredRecord {
    StoredRecord::new(
        &DocumentRef::new("inbox", key),
        ExtractedMetadata::new("invoice", language, "Quarterly invoice for services"),
        status,
    )
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.db");

    let rec = record("invoice.txt", "en", RecordStatus::Succeeded);
    {
        let store = SqliteRecordStore::new(&path).unwrap();
        store.put(&rec).await.unwrap();
    }

    let reopened = SqliteRecordStore::new(&path).unwrap();
    let found = reopened.get(&rec.key()).await.unwrap();
    assert_eq!(found, Some(rec));
}

#[tokio::test]
async fn test_repeated_put_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = SqliteRecordStore::new(dir.path().join("records.db")).unwrap();
    let rec = record("invoice.txt", "en", RecordStatus::GuardrailIntervened);

    store.put(&rec).await.unwrap();
    store.put(&rec).await.unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let found = store.get(&rec.key()).await.unwrap().unwrap();
    assert_eq!(found.status, RecordStatus::GuardrailIntervened);
    assert_eq!(found.llm_response, rec.llm_response);
}

#[tokio::test]
async fn test_languages_are_separate_records() {
    let store = SqliteRecordStore::new(":memory:").unwrap();

    store.put(&record("letter.txt", "en", RecordStatus::Succeeded)).await.unwrap();
    store.put(&record("letter.txt", "de", RecordStatus::Succeeded)).await.unwrap();

    assert_eq!(store.count().unwrap(), 2);
    assert!(store
        .get(&RecordKey::new("letter.txt", "de"))
        .await
        .unwrap()
        .is_some());
    assert!(store
        .get(&RecordKey::new("letter.txt", "fr"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_concurrent_puts_share_connection() {
    let store = SqliteRecordStore::new(":memory:").unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let rec = record(&format!("doc-{}.txt", i), "en", RecordStatus::Succeeded);
            store.put(&rec).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.count().unwrap(), 16);
}

#[tokio::test]
async fn test_fs_fetcher_reads_bucket_files() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("inbox/2024")).unwrap();
    fs::write(root.path().join("inbox/2024/memo.txt"), "Meeting moved to Friday.").unwrap();

    let fetcher = FsContentFetcher::new(root.path());
    let text = fetcher
        .fetch(&DocumentRef::new("inbox", "2024/memo.txt"))
        .await
        .unwrap();
    assert_eq!(text, "Meeting moved to Friday.");
}

#[tokio::test]
async fn test_fs_fetcher_missing_document() {
    let root = TempDir::new().unwrap();
    let fetcher = FsContentFetcher::new(root.path());

    let result = fetcher.fetch(&DocumentRef::new("inbox", "absent.txt")).await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));
}

#[tokio::test]
async fn test_fs_fetcher_rejects_escape() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("inbox")).unwrap();
    fs::write(root.path().join("outside.txt"), "secret").unwrap();

    let fetcher = FsContentFetcher::new(root.path());
    let result = fetcher.fetch(&DocumentRef::new("inbox", "../outside.txt")).await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));
}

#[tokio::test]
async fn test_fs_fetcher_invalid_utf8() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("inbox")).unwrap();
    fs::write(root.path().join("inbox/blob.bin"), [0xff, 0xfe, 0x00]).unwrap();

    let fetcher = FsContentFetcher::new(root.path()).with_retries(3, Duration::from_millis(1));
    let result = fetcher.fetch(&DocumentRef::new("inbox", "blob.bin")).await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::TransientIo(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fs_fetcher_reading_a_directory_is_transient() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("inbox/folder")).unwrap();

    let fetcher = FsContentFetcher::new(root.path()).with_retries(2, Duration::from_millis(1));
    let result = fetcher.fetch(&DocumentRef::new("inbox", "folder")).await;
    assert!(matches!(result, Err(FetchError::TransientIo(_))));
}

#[test]
fn test_fetcher_from_config() {
    let config = StoreConfig {
        documents_root: "/srv/documents".into(),
        ..StoreConfig::default()
    };
    let fetcher = FsContentFetcher::from_config(&config);
    assert_eq!(
        fetcher.resolve(&DocumentRef::new("inbox", "a.txt")),
        Some("/srv/documents/inbox/a.txt".into())
    );
}
