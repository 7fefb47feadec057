//! Storage routing for classified images.
//!
//! Every image lands at `<Warmth>/<Vibe>/<id>.jpg` in a single bucket, so the
//! bucket reads as a two-level category tree for downstream consumers.
//!
//! The [`ObjectStore`] trait is the backend seam. [`StorageRouter`] wraps a
//! backend and turns every failure into an [`UploadOutcome`], so callers can
//! count failed uploads instead of handling errors.

mod oci;
mod types;

pub use oci::{OciObjectStorage, OciStorageConfig};
pub use types::UploadOutcome;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::classify::{Vibe, Warmth};

/// Errors that can occur when writing to object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the write.
    #[error("Storage error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend not configured.
    #[error("Storage not configured: {0}")]
    NotConfigured(String),
}

/// A bucket-scoped object storage backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of this backend for logging.
    fn name(&self) -> &str;

    /// Write `bytes` under `object_name`, replacing any existing object.
    async fn put_object(&self, object_name: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
}

/// Build the object name for a classified item.
pub fn destination_path(item_id: &str, warmth: Warmth, vibe: Vibe) -> String {
    format!("{}/{}/{}.jpg", warmth, vibe, item_id)
}

/// Uploads images and reports the result without ever failing.
#[derive(Clone)]
pub struct StorageRouter {
    store: Arc<dyn ObjectStore>,
}

impl StorageRouter {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &str {
        self.store.name()
    }

    pub async fn upload(&self, bytes: Vec<u8>, destination: &str) -> UploadOutcome {
        let size_bytes = bytes.len() as u64;

        match self.store.put_object(destination, bytes).await {
            Ok(()) => {
                debug!(
                    "Uploaded {} bytes to {} via {}",
                    size_bytes,
                    destination,
                    self.store.name()
                );
                UploadOutcome::succeeded(destination, size_bytes)
            }
            Err(e) => {
                warn!("Upload to {} failed: {}", destination, e);
                UploadOutcome::failed(destination, e)
            }
        }
    }
}
