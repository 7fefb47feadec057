//! Image catalog integration.
//!
//! The catalog yields the batch of candidate images for a run, and the
//! fetcher downloads the raw bytes for each candidate.

mod cat_api;
mod fetcher;
mod types;

pub use cat_api::{CatApiConfig, CatApiSource};
pub use fetcher::{FetcherConfig, HttpImageFetcher};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-200 status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Errors that can occur when downloading an image.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image download from {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// A source of candidate images.
///
/// Fetching is best-effort: implementations swallow every failure and
/// return an empty batch, which the orchestrator treats as a zero-work run.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Name of this source for logging.
    fn name(&self) -> &str;

    /// Fetch the next batch of candidates, bounded by the source's limit.
    async fn fetch_batch(&self) -> Vec<CatalogItem>;
}

/// Downloads raw image bytes for a catalog item.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
