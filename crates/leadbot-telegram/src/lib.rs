// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for Leadbot.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide,
//! providing long polling, update conversion and reply keyboards.

pub mod handler;
pub mod keyboard;

use async_trait::async_trait;
use leadbot_core::error::LeadbotError;
use leadbot_core::traits::{ChannelAdapter, PluginAdapter};
use leadbot_core::types::{AdapterType, HealthStatus, InboundMessage, MessageId, OutboundMessage};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Capacity of the queue between the polling task and `receive()`.
const INBOUND_QUEUE: usize = 100;

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects to Telegram via long polling and replies in plain text, attaching
/// reply keyboards when the outbound message carries one.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    /// Moved into the polling task by `connect`; the queue closes when that task ends.
    inbound_tx: Option<mpsc::Sender<InboundMessage>>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    pub fn new(token: &str) -> Result<Self, LeadbotError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(LeadbotError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_QUEUE);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx: Some(inbound_tx),
            polling_handle: None,
        })
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        handler::CHANNEL_NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadbotError> {
        match self.bot.get_me().await {
            Ok(me) => {
                debug!(bot_id = me.user.id.0, "getMe succeeded");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), LeadbotError> {
        debug!("Telegram channel shutting down");
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    async fn connect(&mut self) -> Result<(), LeadbotError> {
        let Some(tx) = self.inbound_tx.take() else {
            return Ok(());
        };

        let bot = self.bot.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    if let Some(inbound) = handler::to_inbound_message(&msg)
                        && tx.send(inbound).await.is_err()
                    {
                        warn!("inbound channel closed, dropping message");
                    }
                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
            debug!("Telegram polling stopped");
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, LeadbotError> {
        let chat_id = parse_chat_id(&msg.chat_id)?;

        let request = self.bot.send_message(chat_id, msg.content);
        let result = match msg.keyboard.as_ref() {
            Some(kb) => request.reply_markup(keyboard::to_markup(kb)).await,
            None => request.await,
        };

        let sent = result.map_err(|e| LeadbotError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(sent.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundMessage, LeadbotError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| LeadbotError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}

/// Parses a numeric Telegram chat id.
fn parse_chat_id(raw: &str) -> Result<ChatId, LeadbotError> {
    raw.parse::<i64>()
        .map(ChatId)
        .map_err(|e| LeadbotError::Channel {
            message: format!("invalid chat_id {raw:?}: {e}"),
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadbot_core::types::{MessageContent, Sender};

    fn inbound(text: &str) -> InboundMessage {
        InboundMessage {
            id: "1".into(),
            channel: handler::CHANNEL_NAME.into(),
            chat_id: "5".into(),
            sender: Sender {
                id: "5".into(),
                username: None,
            },
            content: MessageContent::Text(text.into()),
            timestamp: String::new(),
        }
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(matches!(
            TelegramChannel::new(""),
            Err(LeadbotError::Config(_))
        ));
        assert!(TelegramChannel::new("   ").is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        assert!(TelegramChannel::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11").is_ok());
    }

    #[test]
    fn adapter_metadata() {
        let channel = TelegramChannel::new("test:token").unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[test]
    fn parse_chat_id_accepts_negative_group_ids() {
        assert_eq!(parse_chat_id("-100123").unwrap(), ChatId(-100123));
        assert_eq!(parse_chat_id("42").unwrap(), ChatId(42));
    }

    #[test]
    fn parse_chat_id_rejects_garbage() {
        let err = parse_chat_id("abc").unwrap_err();
        assert!(err.to_string().contains("invalid chat_id"));
        assert!(!err.is_channel_closed());
    }

    #[tokio::test]
    async fn receive_drains_then_reports_closed_once_sender_is_gone() {
        let mut channel = TelegramChannel::new("test:token").unwrap();
        let tx = channel.inbound_tx.take().unwrap();
        tx.send(inbound("last")).await.unwrap();

        drop(tx);

        assert!(channel.receive().await.is_ok());
        let err = channel.receive().await.unwrap_err();
        assert!(err.is_channel_closed());
    }

    #[tokio::test]
    async fn connect_is_idempotent_once_sender_is_moved() {
        let mut channel = TelegramChannel::new("test:token").unwrap();
        channel.inbound_tx.take();
        channel.connect().await.unwrap();
        assert!(channel.polling_handle.is_none());
    }
}
