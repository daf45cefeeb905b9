// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::LeadbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundMessage, MessageId, OutboundMessage};

/// Adapter for a bidirectional messaging channel.
///
/// The transport is treated as reliable: adapters do not retry, and a failed
/// send is returned to the caller as is.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), LeadbotError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, LeadbotError>;

    /// Receives the next inbound message from the channel.
    async fn receive(&self) -> Result<InboundMessage, LeadbotError>;
}
