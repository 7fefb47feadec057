//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notify::{Notifier, NotifyError};

/// Mock implementation of the Notifier trait.
///
/// Records every message it is asked to send. A pending error set with
/// [`MockNotifier::set_next_error`] fails the next send (the message is still
/// recorded as attempted).
#[derive(Debug, Clone)]
pub struct MockNotifier {
    channel: String,
    messages: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<NotifyError>>>,
}

impl MockNotifier {
    /// Create a notifier that reports itself as `channel`.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            messages: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Every message sent so far.
    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }

    /// Configure the next send to fail with the given error.
    pub async fn set_next_error(&self, error: NotifyError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.messages.write().await.push(text.to_string());

        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_messages() {
        let notifier = MockNotifier::new("webhook");
        notifier.send("first").await.unwrap();
        notifier.send("second").await.unwrap();

        assert_eq!(notifier.messages().await, vec!["first", "second"]);
        assert_eq!(notifier.channel(), "webhook");
    }

    #[tokio::test]
    async fn test_next_error_applies_once() {
        let notifier = MockNotifier::new("telegram");
        notifier
            .set_next_error(NotifyError::Api {
                status: 429,
                message: "slow down".to_string(),
            })
            .await;

        assert!(notifier.send("a").await.is_err());
        assert!(notifier.send("b").await.is_ok());
        assert_eq!(notifier.messages().await.len(), 2);
    }
}
