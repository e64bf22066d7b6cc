//! In-memory record store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use vellum_domain::traits::RecordStore;
use vellum_domain::{PersistenceError, RecordKey, StoredRecord};

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<RecordKey, StoredRecord>,
    writes: usize,
    fail_writes: Option<String>,
}

/// Map-backed [`RecordStore`] for tests and dry runs
///
/// Clones share the same map. Writes can be made to fail to exercise the
/// persistence error path.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every subsequent `put` fail with `message`
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.state().fail_writes = Some(message.into());
    }

    /// Number of distinct records held
    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.state().records.is_empty()
    }

    /// Number of successful `put` calls, including overwrites
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Snapshot of all records, sorted by key
    pub fn records(&self) -> Vec<StoredRecord> {
        let state = self.state();
        let mut records: Vec<_> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.key());
        records
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<(), PersistenceError> {
        let mut state = self.state();
        if let Some(message) = &state.fail_writes {
            return Err(PersistenceError(message.clone()));
        }
        state.records.insert(record.key(), record.clone());
        state.writes += 1;
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, PersistenceError> {
        Ok(self.state().records.get(key).cloned())
    }
}
