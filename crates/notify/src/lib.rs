//! Telegram alert notifier.
//!
//! Posts to the Bot API `sendMessage` method. Disabled when either the bot
//! token or the chat id is missing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use vpnclick_core::{Delivery, Notifier, NotifyError};

/// Configuration for the Telegram notifier.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Base URL of the Bot API (e.g. "https://api.telegram.org").
    pub api_base: String,
    /// Value of the `parse_mode` field.
    pub parse_mode: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            parse_mode: "Markdown".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// Keep the bot token out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &if self.bot_token.is_empty() { "" } else { "***" })
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("parse_mode", &self.parse_mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageForm<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends alerts to a Telegram chat through a bot.
pub struct TelegramNotifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Other(format!("HTTP client setup failed: {}", e)))?;

        if !config.is_enabled() {
            info!("Telegram alerts disabled (TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set)");
        }

        Ok(Self { config, client })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<Delivery, NotifyError> {
        if !self.config.is_enabled() {
            debug!("Skipping alert, notifier not configured");
            return Ok(Delivery::Skipped);
        }

        let form = SendMessageForm {
            chat_id: &self.config.chat_id,
            text: message,
            parse_mode: &self.config.parse_mode,
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .form(&form)
            .send()
            .await
            // without_url() keeps the token-bearing URL out of the message
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: BotApiReply = response
            .json()
            .await
            .map_err(|e| NotifyError::Other(format!("Unreadable reply: {}", e.without_url())))?;
        if !reply.ok {
            return Err(NotifyError::Rejected(
                reply.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }

        debug!(chat_id = %self.config.chat_id, "Alert delivered");
        Ok(Delivery::Sent)
    }
}
