//! Vellum Storage Layer
//!
//! Adapters for the two storage collaborators of the pipeline:
//!
//! - **Content fetchers** ([`ContentFetcher`]) resolve a `{bucket, key}`
//!   reference to document text: [`FsContentFetcher`] reads from a directory
//!   tree, [`MemoryContentFetcher`] serves fixtures.
//! - **Record stores** ([`RecordStore`]) upsert final records keyed by
//!   `(id, language)`: [`SqliteRecordStore`] persists to SQLite,
//!   [`MemoryRecordStore`] keeps a map for tests.
//!
//! # Examples
//!
//! ```no_run
//! use vellum_store::SqliteRecordStore;
//!
//! let store = SqliteRecordStore::new(":memory:").unwrap();
//! // Store is now ready for record upserts
//! ```
//!
//! [`ContentFetcher`]: vellum_domain::traits::ContentFetcher
//! [`RecordStore`]: vellum_domain::traits::RecordStore

#![warn(missing_docs)]

mod config;
mod error;
mod fetcher;
mod memory;
mod sqlite;

pub use config::StoreConfig;
pub use error::StoreError;
pub use fetcher::{FsContentFetcher, MemoryContentFetcher};
pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
