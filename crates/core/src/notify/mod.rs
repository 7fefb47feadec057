//! Outbound notifications for run reports.
//!
//! Two channels are supported, a Discord-style webhook and a Telegram bot.
//! At most one is used per run, picked by [`NotifyConfig::selected_channel`].

mod config;
mod telegram;
mod webhook;

pub use config::{ChannelKind, NotifyConfig};
pub use telegram::TelegramNotifier;
pub use webhook::WebhookNotifier;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel rejected the message.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A channel that can deliver a text message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name for logging.
    fn channel(&self) -> &str;

    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// What happened to a report dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent { channel: String },
    Failed { channel: String, error: String },
    NotConfigured,
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }
}

/// Create the notifier for the selected channel, if any.
pub fn create_notifier(config: &NotifyConfig) -> Result<Option<Arc<dyn Notifier>>, NotifyError> {
    let timeout = Duration::from_secs(config.timeout_secs);

    let notifier: Option<Arc<dyn Notifier>> = match config.selected_channel() {
        Some(ChannelKind::Webhook) => config
            .webhook()
            .map(|url| WebhookNotifier::new(url, timeout))
            .transpose()?
            .map(|n| Arc::new(n) as Arc<dyn Notifier>),
        Some(ChannelKind::Telegram) => config
            .telegram()
            .map(|(token, chat_id)| {
                TelegramNotifier::new(&config.telegram_api_base, token, chat_id, timeout)
            })
            .transpose()?
            .map(|n| Arc::new(n) as Arc<dyn Notifier>),
        None => None,
    };

    Ok(notifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_notifier_none() {
        let notifier = create_notifier(&NotifyConfig::default()).unwrap();
        assert!(notifier.is_none());
    }

    #[test]
    fn test_create_notifier_prefers_webhook() {
        let config = NotifyConfig::default()
            .with_webhook("https://discord.example/api/webhooks/1/x")
            .with_telegram("123:abc", "42");
        let notifier = create_notifier(&config).unwrap().unwrap();
        assert_eq!(notifier.channel(), "webhook");
    }

    #[test]
    fn test_create_notifier_telegram() {
        let config = NotifyConfig::default().with_telegram("123:abc", "42");
        let notifier = create_notifier(&config).unwrap().unwrap();
        assert_eq!(notifier.channel(), "telegram");
    }

    #[test]
    fn test_dispatch_outcome_serialization() {
        let outcome = DispatchOutcome::Sent {
            channel: "webhook".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"sent","channel":"webhook"}"#);
        assert!(outcome.is_sent());
        assert!(!DispatchOutcome::NotConfigured.is_sent());
    }
}
