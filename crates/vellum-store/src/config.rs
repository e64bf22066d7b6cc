//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where documents are read from and records are written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path (`:memory:` for a throwaway store)
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory whose subdirectories are the document buckets
    #[serde(default = "default_documents_root")]
    pub documents_root: PathBuf,

    /// Attempts per document read, including the first
    #[serde(default = "default_fetch_max_attempts")]
    pub fetch_max_attempts: u32,

    /// Delay between read attempts (milliseconds)
    #[serde(default = "default_fetch_retry_delay_ms")]
    pub fetch_retry_delay_ms: u64,
}

fn default_database_path() -> String {
    "vellum.db".to_string()
}

fn default_documents_root() -> PathBuf {
    PathBuf::from("buckets")
}

fn default_fetch_max_attempts() -> u32 {
    3
}

fn default_fetch_retry_delay_ms() -> u64 {
    200
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            documents_root: default_documents_root(),
            fetch_max_attempts: default_fetch_max_attempts(),
            fetch_retry_delay_ms: default_fetch_retry_delay_ms(),
        }
    }
}

impl StoreConfig {
    /// Delay between read attempts as a Duration
    pub fn fetch_retry_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_retry_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database_path.trim().is_empty() {
            return Err("database_path must not be empty".to_string());
        }
        if self.fetch_max_attempts == 0 {
            return Err("fetch_max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }
}
