//! Mock image source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogItem, ImageSource};

/// Mock implementation of the ImageSource trait.
///
/// Returns whatever items were queued, in order, on every fetch. An empty
/// mock behaves like a catalog that failed or had nothing to offer.
#[derive(Debug, Clone, Default)]
pub struct MockImageSource {
    items: Arc<RwLock<Vec<CatalogItem>>>,
    fetch_count: Arc<RwLock<usize>>,
}

impl MockImageSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-loaded with items.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            fetch_count: Arc::new(RwLock::new(0)),
        }
    }

    /// Append an item to the batch.
    pub async fn push_item(&self, item: CatalogItem) {
        self.items.write().await.push(item);
    }

    /// Replace the batch.
    pub async fn set_items(&self, items: Vec<CatalogItem>) {
        *self.items.write().await = items;
    }

    /// Number of times the batch was fetched.
    pub async fn fetch_count(&self) -> usize {
        *self.fetch_count.read().await
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_batch(&self) -> Vec<CatalogItem> {
        *self.fetch_count.write().await += 1;
        self.items.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_returns_items_in_order() {
        let source = MockImageSource::new();
        source.push_item(fixtures::catalog_item("a")).await;
        source.push_item(fixtures::catalog_item("b")).await;

        let batch = source.fetch_batch().await;
        let ids: Vec<&str> = batch.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(source.fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_with_items_then_replace() {
        let source = MockImageSource::with_items(fixtures::catalog_items(3));
        assert_eq!(source.fetch_batch().await.len(), 3);
        assert_eq!(source.fetch_batch().await[2].id, "cat-2");

        source.set_items(Vec::new()).await;
        assert!(source.fetch_batch().await.is_empty());
        assert_eq!(source.fetch_count().await, 3);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let source = MockImageSource::new();
        assert!(source.fetch_batch().await.is_empty());
    }
}
