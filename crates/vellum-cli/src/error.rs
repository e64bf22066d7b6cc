//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A service client or channel could not be built
    #[error("Setup error: {0}")]
    Setup(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] vellum_store::StoreError),

    /// Worker error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] vellum_pipeline::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// One or more runs ended in the failed state
    #[error("{0} run(s) failed")]
    RunsFailed(usize),
}
