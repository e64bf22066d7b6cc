//! SQLite-backed record store

use crate::error::StoreError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use vellum_domain::traits::RecordStore;
use vellum_domain::{ExtractedMetadata, PersistenceError, RecordKey, RecordStatus, StoredRecord};

/// SQLite implementation of [`RecordStore`]
///
/// The connection sits behind a mutex and every call runs on tokio's
/// blocking pool, so the store can be shared across concurrent runs.
/// Upserts to the same `(id, language)` are serialized by SQLite; the last
/// write wins.
#[derive(Clone)]
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// Open (or create) the store at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vellum_store::SqliteRecordStore;
    ///
    /// let store = SqliteRecordStore::new("vellum.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
        conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or overwrite a record (blocking)
    pub fn upsert(&self, record: &StoredRecord) -> Result<(), StoreError> {
        let llm_response = serde_json::to_string(&record.llm_response)?;
        let conn = Self::lock(&self.conn);
        conn.execute(
            "INSERT INTO records (id, language, status, document_type, summary, llm_response)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id, language) DO UPDATE SET
             status = excluded.status,
             document_type = excluded.document_type,
             summary = excluded.summary,
             llm_response = excluded.llm_response",
            params![
                &record.id,
                &record.language,
                record.status.as_str(),
                &record.document_type,
                &record.summary,
                &llm_response,
            ],
        )?;
        debug!("Upserted record ({}, {})", record.id, record.language);
        Ok(())
    }

    /// Read a record by key (blocking)
    pub fn find(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        let conn = Self::lock(&self.conn);
        let row = conn
            .query_row(
                "SELECT id, language, status, document_type, summary, llm_response
                 FROM records WHERE id = ?1 AND language = ?2",
                params![&key.id, &key.language],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, language, status, document_type, summary, llm_response)) = row else {
            return Ok(None);
        };

        let status = RecordStatus::parse(&status)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown record status: {}", status)))?;
        let llm_response: ExtractedMetadata = serde_json::from_str(&llm_response)?;

        Ok(Some(StoredRecord {
            id,
            language,
            status,
            llm_response,
            document_type,
            summary,
        }))
    }

    /// Number of stored records (blocking)
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = Self::lock(&self.conn);
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<(), PersistenceError> {
        let store = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || store.upsert(&record))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))??;
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, PersistenceError> {
        let store = self.clone();
        let key = key.clone();
        let record = tokio::task::spawn_blocking(move || store.find(&key))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))??;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_domain::DocumentRef;

    fn record(key: &str, language: &str, summary: &str, status: RecordStatus) -> StoredRecord {
        StoredRecord::new(
            &DocumentRef::new("inbox", key),
            ExtractedMetadata::new("contract", language, summary),
            status,
        )
    }

    #[test]
    fn test_upsert_and_find() {
        let store = SqliteRecordStore::new(":memory:").unwrap();
        let rec = record("a.txt", "en", "first", RecordStatus::Succeeded);

        store.upsert(&rec).unwrap();
        assert_eq!(store.find(&rec.key()).unwrap(), Some(rec));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_find_missing() {
        let store = SqliteRecordStore::new(":memory:").unwrap();
        assert!(store.find(&RecordKey::new("nope", "en")).unwrap().is_none());
    }

    #[test]
    fn test_unknown_status_is_invalid_data() {
        let store = SqliteRecordStore::new(":memory:").unwrap();
        insert_raw_row(&store);
        let result = store.find(&RecordKey::new("raw.txt", "en"));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    fn insert_raw_row(store: &SqliteRecordStore) {
        let conn = SqliteRecordStore::lock(&store.conn);
        conn.execute(
            "INSERT INTO records (id, language, status, document_type, summary, llm_response)
             VALUES ('raw.txt', 'en', 'FAILED', 'memo', 's', '{}')",
            [],
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = SqliteRecordStore::new(":memory:").unwrap();

        store
            .put(&record("a.txt", "en", "first", RecordStatus::Succeeded))
            .await
            .unwrap();
        let second = record("a.txt", "en", "second", RecordStatus::GuardrailIntervened);
        store.put(&second).await.unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get(&second.key()).await.unwrap(), Some(second));
    }
}
