//! Mock image fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{FetchError, ImageFetcher};

/// Mock implementation of the ImageFetcher trait.
///
/// Serves registered bytes by URL. Unknown URLs answer like a 404, and URLs
/// marked with [`MockImageFetcher::fail_url`] answer with the given status.
#[derive(Debug, Clone, Default)]
pub struct MockImageFetcher {
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockImageFetcher {
    /// Create a new fetcher with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `url`.
    pub async fn add_image(&self, url: &str, bytes: Vec<u8>) {
        self.images.write().await.insert(url.to_string(), bytes);
    }

    /// Make `url` fail with an HTTP status.
    pub async fn fail_url(&self, url: &str, status: u16) {
        self.failures.write().await.insert(url.to_string(), status);
    }

    /// URLs requested so far, in order.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.write().await.push(url.to_string());

        if let Some(status) = self.failures.read().await.get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        self.images
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_bytes() {
        let fetcher = MockImageFetcher::new();
        fetcher.add_image("https://x/a.jpg", vec![1, 2, 3]).await;

        assert_eq!(fetcher.fetch("https://x/a.jpg").await.unwrap(), vec![1, 2, 3]);
        assert_eq!(fetcher.requested_urls().await, vec!["https://x/a.jpg"]);
    }

    #[tokio::test]
    async fn test_unknown_url_is_404() {
        let fetcher = MockImageFetcher::new();
        let result = fetcher.fetch("https://x/missing.jpg").await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_failure_overrides_image() {
        let fetcher = MockImageFetcher::new();
        fetcher.add_image("https://x/a.jpg", vec![1]).await;
        fetcher.fail_url("https://x/a.jpg", 503).await;

        let result = fetcher.fetch("https://x/a.jpg").await;
        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
    }
}
