//! Oracle Cloud Infrastructure Object Storage backend.
//!
//! Writes go through a pre-authenticated request (PAR) URL, so no request
//! signing happens here. The PAR must grant object write access on the
//! bucket.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ObjectStore, StorageError};

/// OCI Object Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OciStorageConfig {
    /// PAR base URL, e.g.
    /// `https://objectstorage.eu-frankfurt-1.oraclecloud.com/p/<token>`.
    pub endpoint: String,
    /// Object Storage namespace (tenancy).
    pub namespace: String,
    /// Target bucket.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_bucket() -> String {
    "bucket-cats".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Object store backed by an OCI bucket.
pub struct OciObjectStorage {
    client: Client,
    endpoint: String,
    namespace: String,
    bucket: String,
}

impl OciObjectStorage {
    pub fn new(config: OciStorageConfig) -> Result<Self, StorageError> {
        if config.endpoint.is_empty() {
            return Err(StorageError::NotConfigured(
                "OCI endpoint is required".to_string(),
            ));
        }
        if config.namespace.is_empty() || config.bucket.is_empty() {
            return Err(StorageError::NotConfigured(
                "OCI namespace and bucket are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            namespace: config.namespace,
            bucket: config.bucket,
        })
    }

    /// URL for an object. Path separators in the name are kept so the
    /// console shows the category folders.
    pub fn object_url(&self, object_name: &str) -> String {
        let encoded: Vec<String> = object_name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        format!(
            "{}/n/{}/b/{}/o/{}",
            self.endpoint,
            urlencoding::encode(&self.namespace),
            urlencoding::encode(&self.bucket),
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ObjectStore for OciObjectStorage {
    fn name(&self) -> &str {
        "oci"
    }

    async fn put_object(&self, object_name: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let url = self.object_url(object_name);
        let content_type = content_type_for(&bytes);

        debug!(
            "OCI put object: bucket={}, name={}, size={}, type={}",
            self.bucket,
            object_name,
            bytes.len(),
            content_type
        );

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

/// MIME type sniffed from the bytes. The object name always ends in `.jpg`,
/// but the catalog also serves PNG and GIF, which are stored unchanged.
pub(crate) fn content_type_for(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type(),
        Err(_) => "application/octet-stream",
    }
}
