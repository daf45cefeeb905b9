// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation controller and agent loop for Leadbot.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives messages from a channel adapter
//! - Hands each one to the [`ConversationController`]
//! - Logs per-message failures without stopping
//! - Shuts adapters down on cancellation or when the channel closes

pub mod controller;
pub mod faq;
pub mod menu;
pub mod session;
pub mod shutdown;

use std::sync::Arc;

use leadbot_core::{ChannelAdapter, InboundMessage, LeadStore, LeadbotError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub use controller::{ConversationController, Effect, Step};
pub use faq::{FaqEntry, FaqTable};
pub use menu::{Menu, MenuChoice};
pub use session::{SessionState, SessionStore};

/// The main loop that moves messages from the channel through the controller.
pub struct AgentLoop {
    channel: Box<dyn ChannelAdapter + Send + Sync>,
    leads: Arc<dyn LeadStore>,
    controller: ConversationController,
}

impl AgentLoop {
    pub fn new(
        channel: Box<dyn ChannelAdapter + Send + Sync>,
        leads: Arc<dyn LeadStore>,
        controller: ConversationController,
    ) -> Self {
        info!(
            channel = channel.name(),
            lead_store = leads.name(),
            "agent loop initialized"
        );
        Self {
            channel,
            leads,
            controller,
        }
    }

    /// Runs until the cancellation token fires or the channel closes.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), LeadbotError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                msg = self.channel.receive() => {
                    match msg {
                        Ok(inbound) => self.handle_inbound(inbound).await,
                        Err(e) if e.is_channel_closed() => {
                            warn!(error = %e, "channel closed, stopping agent loop");
                            break;
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.shutdown().await {
            warn!(error = %e, "channel shutdown failed");
        }
        self.leads.shutdown().await?;

        info!(
            active_sessions = self.controller.active_sessions(),
            "agent loop stopped"
        );
        Ok(())
    }

    async fn handle_inbound(&mut self, inbound: InboundMessage) {
        let user_id = inbound.sender.id.clone();
        if let Err(e) = self.controller.handle(self.channel.as_ref(), inbound).await {
            error!(
                user_id = user_id.as_str(),
                error = %e,
                "failed to handle inbound message"
            );
        }
    }

    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }
}
