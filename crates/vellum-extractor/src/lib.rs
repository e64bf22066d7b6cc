//! Vellum Extractor
//!
//! Turns raw document text into [`ExtractedMetadata`] with a single call to
//! a pre-registered extraction prompt.
//!
//! # Overview
//!
//! The prompt is identified by an ARN plus a pinned version and takes the
//! document content as its only template variable. The model is expected to
//! answer with one structured tool invocation (by default
//! `print_document_metadata`) whose input is the metadata object.
//!
//! # Architecture
//!
//! ```text
//! content → InferenceRequest → InferenceService → tool-use scan → ExtractedMetadata
//! ```
//!
//! A reply without a matching tool invocation is a structural failure
//! (`"Invalid JSON Generated."`) and is never retried here. Transport
//! failures surface as [`ExtractorError::Inference`]; bounded retries for
//! those belong to the service client.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vellum_extractor::{ExtractorConfig, MetadataExtractor};
//! use vellum_llm::{HttpClientConfig, HttpInferenceClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpInferenceClient::new(HttpClientConfig::new("http://localhost:8400"))?;
//! let extractor = MetadataExtractor::new(Arc::new(service), ExtractorConfig::default());
//!
//! let metadata = extractor.extract("Contract dated 2023 between ...").await?;
//! println!("{} ({})", metadata.document_type, metadata.language);
//! # Ok(())
//! # }
//! ```
//!
//! [`ExtractedMetadata`]: vellum_domain::ExtractedMetadata

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;


pub use config::{ExtractorConfig, DEFAULT_TOOL_NAME};
pub use error::{ExtractorError, MALFORMED_RESPONSE_MESSAGE};
pub use extractor::MetadataExtractor;
pub use parser::{find_tool_use, parse_metadata};
