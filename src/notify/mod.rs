//! Telegram delivery
//!
//! Sends rendered alert messages to the destination chat.


use crate::config::TelegramConfig;
use crate::error::{RelayError, Result};
use crate::format::{ParseMode, RenderedMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Delivers a rendered message somewhere
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, message: &RenderedMessage) -> Result<()>;
}

/// Telegram notifier
#[derive(Clone)]
pub struct Notifier {
    http: Client,
    api_url: String,
    bot_token: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct TelegramMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
    disable_web_page_preview: bool,
}

impl Notifier {
    pub fn new(api_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            bot_token: bot_token.into(),
            enabled: true,
        }
    }

    /// Create a disabled notifier (for when Telegram is not configured)
    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            api_url: String::new(),
            bot_token: String::new(),
            enabled: false,
        }
    }

    /// Enabled only when a bot token is configured
    pub fn from_config(config: &TelegramConfig) -> Self {
        match config.bot_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Self::new(config.api_url.trim_end_matches('/'), token),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

#[async_trait]
impl Deliver for Notifier {
    async fn deliver(&self, message: &RenderedMessage) -> Result<()> {
        if !self.enabled {
            tracing::info!(
                chat_id = %message.chat_id,
                variant = %message.variant,
                "Telegram disabled, message not sent:\n{}",
                message.text
            );
            return Ok(());
        }

        let body = TelegramMessage {
            chat_id: &message.chat_id,
            text: &message.text,
            parse_mode: message.parse_mode,
            disable_web_page_preview: message.disable_preview,
        };

        let response = self.http.post(self.endpoint()).json(&body).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Telegram send failed: {}", error_text);
            return Err(RelayError::Delivery(error_text));
        }

        Ok(())
    }
}
