//! Content fetchers

use crate::config::StoreConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};
use vellum_domain::traits::ContentFetcher;
use vellum_domain::{DocumentRef, FetchError};

/// Reads documents from a directory tree
///
/// Each bucket is a directory directly under `root`; the key is a relative
/// path inside it. References that would escape their bucket do not
/// resolve. Transient I/O errors are retried a fixed number of times.
#[derive(Debug, Clone)]
pub struct FsContentFetcher {
    root: PathBuf,
    max_attempts: u32,
    retry_delay: Duration,
}

impl FsContentFetcher {
    /// Fetcher rooted at `root` with a single attempt per read
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }

    /// Fetcher configured from the storage section
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            root: config.documents_root.clone(),
            max_attempts: config.fetch_max_attempts.max(1),
            retry_delay: config.fetch_retry_delay(),
        }
    }

    /// Set the retry policy for transient errors
    pub fn with_retries(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Filesystem path of a document, if the reference is well-formed
    pub fn resolve(&self, document: &DocumentRef) -> Option<PathBuf> {
        if !is_single_component(&document.bucket) || !is_relative_inside(&document.key) {
            return None;
        }
        Some(self.root.join(&document.bucket).join(&document.key))
    }

    async fn read_with_retries(&self, path: &Path, document: &DocumentRef) -> Result<Vec<u8>, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match tokio::fs::read(path).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => read_error(document, e),
            };
            if !error.is_retryable() || attempt >= self.max_attempts {
                return Err(error);
            }
            warn!(
                "Read failed (attempt {}/{}): {}",
                attempt, self.max_attempts, error
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

fn read_error(document: &DocumentRef, error: io::Error) -> FetchError {
    match error.kind() {
        io::ErrorKind::NotFound => FetchError::NotFound(document.to_string()),
        _ => FetchError::TransientIo(format!("{}: {}", document, error)),
    }
}

fn is_single_component(bucket: &str) -> bool {
    let mut components = Path::new(bucket).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_relative_inside(key: &str) -> bool {
    !key.is_empty()
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[async_trait]
impl ContentFetcher for FsContentFetcher {
    async fn fetch(&self, document: &DocumentRef) -> Result<String, FetchError> {
        let path = self
            .resolve(document)
            .ok_or_else(|| FetchError::NotFound(document.to_string()))?;

        let bytes = self.read_with_retries(&path, document).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        String::from_utf8(bytes).map_err(|e| {
            FetchError::TransientIo(format!("{} is not valid UTF-8: {}", document, e))
        })
    }
}

#[derive(Debug, Default)]
struct FixtureState {
    documents: HashMap<DocumentRef, String>,
    failures: HashMap<DocumentRef, FetchError>,
    fetches: usize,
}

/// Serves documents from memory, for tests
///
/// Unknown references resolve to `NotFound`. Clones share fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentFetcher {
    state: Arc<Mutex<FixtureState>>,
}

impl MemoryContentFetcher {
    /// Create an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add (or replace) a document
    pub fn insert(&self, document: DocumentRef, content: impl Into<String>) {
        self.state().documents.insert(document, content.into());
    }

    /// Make fetches of `document` fail with `error`
    pub fn fail_with(&self, document: DocumentRef, error: FetchError) {
        self.state().failures.insert(document, error);
    }

    /// Number of fetch calls received
    pub fn fetch_count(&self) -> usize {
        self.state().fetches
    }
}

#[async_trait]
impl ContentFetcher for MemoryContentFetcher {
    async fn fetch(&self, document: &DocumentRef) -> Result<String, FetchError> {
        let mut state = self.state();
        state.fetches += 1;
        if let Some(error) = state.failures.get(document) {
            return Err(error.clone());
        }
        state
            .documents
            .get(document)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(document.to_string()))
    }
}
