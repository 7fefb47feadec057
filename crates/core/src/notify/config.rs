//! Notification channel configuration.

use serde::{Deserialize, Serialize};

/// Which channel a report goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Webhook,
    Telegram,
}

/// Notification settings.
///
/// Empty strings count as unset, so a config template with empty values
/// behaves like one with the keys removed. Any other value, whitespace
/// included, counts as set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook URL (Discord-compatible). Takes precedence over Telegram.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Telegram bot token.
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    /// Telegram chat to post into.
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    /// Telegram Bot API base URL.
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: default_telegram_api_base(),
            timeout_secs: default_timeout(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl NotifyConfig {
    /// Webhook URL, if set.
    pub fn webhook(&self) -> Option<&str> {
        non_empty(&self.webhook_url)
    }

    /// Bot token and chat id, only if both are set.
    pub fn telegram(&self) -> Option<(&str, &str)> {
        match (
            non_empty(&self.telegram_bot_token),
            non_empty(&self.telegram_chat_id),
        ) {
            (Some(token), Some(chat_id)) => Some((token, chat_id)),
            _ => None,
        }
    }

    /// The channel reports go to: the webhook whenever it is set, otherwise
    /// Telegram, otherwise none.
    pub fn selected_channel(&self) -> Option<ChannelKind> {
        if self.webhook().is_some() {
            Some(ChannelKind::Webhook)
        } else if self.telegram().is_some() {
            Some(ChannelKind::Telegram)
        } else {
            None
        }
    }

    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_telegram(mut self, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        self.telegram_bot_token = Some(token.into());
        self.telegram_chat_id = Some(chat_id.into());
        self
    }

    pub fn with_telegram_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.telegram_api_base = api_base.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_configured() {
        let config = NotifyConfig::default();
        assert_eq!(config.selected_channel(), None);
        assert_eq!(config.telegram_api_base, "https://api.telegram.org");
    }

    #[test]
    fn test_webhook_wins_over_telegram() {
        let config = NotifyConfig::default()
            .with_telegram("123:abc", "42")
            .with_webhook("https://discord.example/api/webhooks/1/x");
        assert_eq!(config.selected_channel(), Some(ChannelKind::Webhook));
    }

    #[test]
    fn test_telegram_when_no_webhook() {
        let config = NotifyConfig::default().with_telegram("123:abc", "42");
        assert_eq!(config.selected_channel(), Some(ChannelKind::Telegram));
        assert_eq!(config.telegram(), Some(("123:abc", "42")));
    }

    #[test]
    fn test_telegram_needs_both_values() {
        let config = NotifyConfig {
            telegram_bot_token: Some("123:abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.selected_channel(), None);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let toml = r#"
            webhook_url = ""
            telegram_bot_token = "123:abc"
            telegram_chat_id = ""
        "#;
        let config: NotifyConfig = toml::from_str(toml).unwrap();
        assert!(config.webhook().is_none());
        assert!(config.telegram().is_none());
        assert_eq!(config.selected_channel(), None);
    }

    #[test]
    fn test_whitespace_webhook_counts_as_set() {
        let config = NotifyConfig::default()
            .with_webhook("  ")
            .with_telegram("123:abc", "42");
        assert_eq!(config.webhook(), Some("  "));
        assert_eq!(config.selected_channel(), Some(ChannelKind::Webhook));
    }

    #[test]
    fn test_blank_webhook_falls_through_to_telegram() {
        let config = NotifyConfig::default()
            .with_webhook("")
            .with_telegram("123:abc", "42");
        assert_eq!(config.selected_channel(), Some(ChannelKind::Telegram));
    }
}
