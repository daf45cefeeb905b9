// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update filtering and content extraction.
//!
//! Turns an incoming Telegram message into a channel-agnostic
//! [`InboundMessage`]. Only text messages from a known user are routed;
//! stickers, photos, channel posts and the like are dropped.

use leadbot_core::types::{InboundMessage, MessageContent, Sender};
use teloxide::types::Message;
use tracing::debug;

/// Channel name stamped on every inbound message.
pub const CHANNEL_NAME: &str = "telegram";

/// Splits text into a bot command or plain text.
///
/// `/start@my_bot payload` becomes `Command { name: "start", args: "payload" }`.
pub fn parse_content(text: &str) -> MessageContent {
    let Some(rest) = text.strip_prefix('/') else {
        return MessageContent::Text(text.to_string());
    };

    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default();

    MessageContent::Command {
        name: name.to_string(),
        args: args.to_string(),
    }
}

/// Converts a Telegram message into an [`InboundMessage`].
///
/// Returns `None` for messages without a sender or without text.
pub fn to_inbound_message(msg: &Message) -> Option<InboundMessage> {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = msg.chat.id.0, "ignoring message without sender");
        return None;
    };

    let Some(text) = msg.text() else {
        debug!(msg_id = msg.id.0, "ignoring non-text message");
        return None;
    };

    Some(InboundMessage {
        id: msg.id.0.to_string(),
        channel: CHANNEL_NAME.to_string(),
        chat_id: msg.chat.id.0.to_string(),
        sender: Sender {
            id: user.id.0.to_string(),
            username: user.username.clone(),
        },
        content: parse_content(text),
        timestamp: msg.date.to_rfc3339(),
    })
}
