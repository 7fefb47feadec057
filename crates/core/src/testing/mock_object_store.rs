//! Mock object store for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{ObjectStore, StorageError};

/// A recorded put for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPut {
    /// Object name that was written.
    pub object_name: String,
    /// Bytes that were sent.
    pub bytes: Vec<u8>,
    /// Whether the put succeeded.
    pub success: bool,
}

/// Mock implementation of the ObjectStore trait.
///
/// Provides controllable behavior for testing:
/// - Track every put for assertions
/// - Fail specific object names, or every put
#[derive(Debug, Clone, Default)]
pub struct MockObjectStore {
    puts: Arc<RwLock<Vec<RecordedPut>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    fail_all: Arc<RwLock<bool>>,
}

impl MockObjectStore {
    /// Create a new store that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject puts to this object name.
    pub async fn fail_object(&self, object_name: &str) {
        self.failing.write().await.insert(object_name.to_string());
    }

    /// Reject every put.
    pub async fn set_fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    /// Every put attempt, successful or not.
    pub async fn recorded_puts(&self) -> Vec<RecordedPut> {
        self.puts.read().await.clone()
    }

    /// Number of put attempts.
    pub async fn put_count(&self) -> usize {
        self.puts.read().await.len()
    }

    /// Names of objects that were stored successfully.
    pub async fn object_names(&self) -> Vec<String> {
        self.puts
            .read()
            .await
            .iter()
            .filter(|p| p.success)
            .map(|p| p.object_name.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn put_object(&self, object_name: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let rejected =
            *self.fail_all.read().await || self.failing.read().await.contains(object_name);

        self.puts.write().await.push(RecordedPut {
            object_name: object_name.to_string(),
            bytes,
            success: !rejected,
        });

        if rejected {
            return Err(StorageError::Api {
                status: 503,
                message: format!("mock rejected {}", object_name),
            });
        }

        Ok(())
    }
}
