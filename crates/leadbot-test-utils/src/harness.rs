// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation tests.
//!
//! `TestHarness` wires a [`ConversationController`] to a [`MockChannel`] and a
//! CSV lead log in a temp directory. `send_text()` drives one message through
//! the full controller, exactly as the agent loop would.

use std::path::PathBuf;
use std::sync::Arc;

use leadbot_agent::{ConversationController, SessionState};
use leadbot_config::LeadbotConfig;
use leadbot_core::types::{InboundMessage, Lead, MessageContent, OutboundMessage, Sender};
use leadbot_core::{LeadStore, LeadbotError};
use leadbot_storage::CsvLeadLog;

use crate::mock_channel::MockChannel;

/// Administrator chat used by harness configs unless overridden.
pub const TEST_ADMIN_CHAT_ID: i64 = 999_000;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: LeadbotConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = LeadbotConfig::default();
        config.telegram.bot_token = Some("test-token".to_string());
        config.telegram.admin_chat_id = Some(TEST_ADMIN_CHAT_ID);
        Self { config }
    }

    /// Replace the whole configuration (the leads path is still redirected).
    pub fn with_config(mut self, config: LeadbotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the administrator chat id.
    pub fn with_admin_chat(mut self, chat_id: i64) -> Self {
        self.config.telegram.admin_chat_id = Some(chat_id);
        self
    }

    /// Build the harness with a fresh temp directory for the lead log.
    pub async fn build(self) -> Result<TestHarness, LeadbotError> {
        let temp_dir = tempfile::TempDir::new().map_err(LeadbotError::storage)?;
        let leads_path = temp_dir.path().join("leads.csv");

        let mut config = self.config;
        config.storage.leads_path = leads_path.display().to_string();

        let store = Arc::new(CsvLeadLog::new(&config.storage));
        store.initialize().await?;
        let controller = ConversationController::new(&config, store.clone())?;

        Ok(TestHarness {
            controller,
            channel: MockChannel::new(),
            store,
            leads_path,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A controller, mock channel and temp CSV log wired together.
pub struct TestHarness {
    controller: ConversationController,
    channel: MockChannel,
    store: Arc<CsvLeadLog>,
    leads_path: PathBuf,
    config: LeadbotConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Sends a text message from `user_id` (no username).
    pub async fn send_text(&mut self, user_id: &str, text: &str) -> Result<(), LeadbotError> {
        self.send(user_id, None, MessageContent::Text(text.to_string()))
            .await
    }

    /// Sends a text message from a user with a Telegram username.
    pub async fn send_text_as(
        &mut self,
        user_id: &str,
        username: &str,
        text: &str,
    ) -> Result<(), LeadbotError> {
        self.send(
            user_id,
            Some(username),
            MessageContent::Text(text.to_string()),
        )
        .await
    }

    /// Sends a bot command such as `start`.
    pub async fn send_command(&mut self, user_id: &str, name: &str) -> Result<(), LeadbotError> {
        self.send(
            user_id,
            None,
            MessageContent::Command {
                name: name.to_string(),
                args: String::new(),
            },
        )
        .await
    }

    async fn send(
        &mut self,
        user_id: &str,
        username: Option<&str>,
        content: MessageContent,
    ) -> Result<(), LeadbotError> {
        let inbound = InboundMessage {
            id: format!("harness-{}", self.channel.sent_count().await),
            channel: "mock".to_string(),
            chat_id: user_id.to_string(),
            sender: Sender {
                id: user_id.to_string(),
                username: username.map(str::to_string),
            },
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.controller.handle(&self.channel, inbound).await
    }

    /// Every message sent so far, in order.
    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.channel.sent_messages().await
    }

    /// Messages sent to `chat_id`.
    pub async fn sent_to(&self, chat_id: &str) -> Vec<OutboundMessage> {
        self.sent()
            .await
            .into_iter()
            .filter(|m| m.chat_id == chat_id)
            .collect()
    }

    /// Messages sent to the administrator chat.
    pub async fn admin_messages(&self) -> Vec<OutboundMessage> {
        let admin = self
            .config
            .telegram
            .admin_chat_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.sent_to(&admin).await
    }

    /// Text of the most recent message sent to `chat_id`.
    pub async fn last_reply(&self, chat_id: &str) -> Option<String> {
        self.sent_to(chat_id).await.pop().map(|m| m.content)
    }

    pub async fn leads(&self) -> Result<Vec<Lead>, LeadbotError> {
        self.store.list().await
    }

    pub fn state_of(&self, user_id: &str) -> SessionState {
        self.controller.state_of(user_id)
    }

    pub fn channel(&self) -> &MockChannel {
        &self.channel
    }

    pub fn config(&self) -> &LeadbotConfig {
        &self.config
    }

    pub fn leads_path(&self) -> &std::path::Path {
        &self.leads_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_routes_start_to_greeting() {
        let mut harness = TestHarness::builder().build().await.unwrap();
        harness.send_command("1", "start").await.unwrap();
        let greeting = harness.config().messages.greeting.clone();
        assert_eq!(harness.last_reply("1").await, Some(greeting));
    }

    #[tokio::test]
    async fn harness_log_lives_in_temp_dir() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert!(harness.leads_path().ends_with("leads.csv"));
        assert!(harness.leads().await.unwrap().is_empty());
    }
}
