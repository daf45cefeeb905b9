// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation controller.
//!
//! Each inbound message goes through two stages:
//! 1. [`ConversationController::plan`] looks at the sender's current state and
//!    the message, and produces a [`Step`]: the next state plus an ordered list
//!    of [`Effect`]s. Planning performs no I/O.
//! 2. [`ConversationController::handle`] executes the effects in order (reply,
//!    admin notification, lead append) and commits the next state only after
//!    every effect succeeded. A failed send or append leaves the sender in the
//!    state they were in before the message.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use leadbot_config::model::{LeadbotConfig, MessagesConfig};
use leadbot_core::{
    ChannelAdapter, InboundMessage, Lead, LeadStore, LeadbotError, MessageContent,
    OutboundMessage, ReplyKeyboard, Sender,
};
use tracing::{debug, info, warn};

use crate::faq::FaqTable;
use crate::menu::{Menu, MenuChoice};
use crate::session::{SessionState, SessionStore};

/// Command that resets the conversation from any state.
pub const START_COMMAND: &str = "start";

/// A side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reply to the originating chat.
    Reply { text: String, keyboard: ReplyKeyboard },
    /// Send a plain message to the administrator chat.
    NotifyAdmin(String),
    /// Append a completed lead to the durable log.
    AppendLead(Lead),
}

/// Outcome of planning one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Step {
    fn new(next: SessionState) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn reply(mut self, text: &str, keyboard: ReplyKeyboard) -> Self {
        self.effects.push(Effect::Reply {
            text: text.to_string(),
            keyboard,
        });
        self
    }

    fn notify_admin(mut self, text: String) -> Self {
        self.effects.push(Effect::NotifyAdmin(text));
        self
    }

    fn append_lead(mut self, lead: Lead) -> Self {
        self.effects.push(Effect::AppendLead(lead));
        self
    }
}

/// Routes user messages through the menu, FAQ and lead-intake flows.
pub struct ConversationController {
    sessions: SessionStore,
    faq: FaqTable,
    menu: Menu,
    messages: MessagesConfig,
    admin_chat_id: String,
    leads: Arc<dyn LeadStore>,
}

impl ConversationController {
    /// Builds a controller from validated configuration.
    ///
    /// Fails if no administrator chat is configured.
    pub fn new(config: &LeadbotConfig, leads: Arc<dyn LeadStore>) -> Result<Self, LeadbotError> {
        let admin_chat_id = config.telegram.admin_chat_id.ok_or_else(|| {
            LeadbotError::Config("telegram.admin_chat_id is not set".to_string())
        })?;

        let faq = FaqTable::from_config(&config.faq);
        if faq.is_empty() {
            warn!("FAQ table is empty, every question gets the fallback reply");
        }

        info!(
            faq_entries = faq.len(),
            admin_chat_id, "conversation controller initialized"
        );

        Ok(Self {
            sessions: SessionStore::new(),
            faq,
            menu: Menu::from_config(&config.menu),
            messages: config.messages.clone(),
            admin_chat_id: admin_chat_id.to_string(),
            leads,
        })
    }

    /// Current state of a user's conversation.
    pub fn state_of(&self, user_id: &str) -> SessionState {
        self.sessions.get(user_id)
    }

    /// Number of users with a flow in progress.
    pub fn active_sessions(&self) -> usize {
        self.sessions.active_count()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Decides the transition for one message without performing it.
    pub fn plan(
        &self,
        state: &SessionState,
        sender: &Sender,
        content: &MessageContent,
        now: DateTime<Utc>,
    ) -> Step {
        let text = match content {
            MessageContent::Command { name, .. } if name == START_COMMAND => {
                return Step::new(SessionState::Idle)
                    .reply(&self.messages.greeting, self.menu.main_keyboard());
            }
            MessageContent::Command { .. } => return Step::new(state.clone()),
            MessageContent::Text(text) => text.as_str(),
        };

        if !state.is_idle() && self.menu.is_back(text) {
            return Step::new(SessionState::Idle)
                .reply(&self.messages.back_to_menu, self.menu.main_keyboard());
        }

        match state {
            SessionState::Idle => self.plan_menu(sender, text),
            SessionState::AwaitingFaqQuery => {
                let answer = self
                    .faq
                    .lookup(text)
                    .unwrap_or(self.messages.faq_fallback.as_str());
                Step::new(SessionState::Idle).reply(answer, self.menu.main_keyboard())
            }
            SessionState::AwaitingLeadName => {
                let name = text.trim();
                if name.is_empty() {
                    Step::new(SessionState::AwaitingLeadName)
                        .reply(&self.messages.lead_name_empty, self.menu.back_keyboard())
                } else {
                    Step::new(SessionState::AwaitingLeadContact {
                        name: name.to_string(),
                    })
                    .reply(&self.messages.lead_contact_prompt, self.menu.back_keyboard())
                }
            }
            SessionState::AwaitingLeadContact { name } => {
                match Lead::with_timestamp(name, text, sender, now) {
                    Ok(lead) => {
                        let notice = self.render_new_lead(&lead);
                        Step::new(SessionState::Idle)
                            .append_lead(lead)
                            .notify_admin(notice)
                            .reply(&self.messages.lead_accepted, self.menu.main_keyboard())
                    }
                    Err(_) => Step::new(state.clone())
                        .reply(&self.messages.lead_contact_empty, self.menu.back_keyboard()),
                }
            }
        }
    }

    fn plan_menu(&self, sender: &Sender, text: &str) -> Step {
        match self.menu.choice(text) {
            Some(MenuChoice::Faq) => Step::new(SessionState::AwaitingFaqQuery)
                .reply(&self.messages.faq_prompt, self.menu.back_keyboard()),
            Some(MenuChoice::Lead) => Step::new(SessionState::AwaitingLeadName)
                .reply(&self.messages.lead_name_prompt, self.menu.back_keyboard()),
            Some(MenuChoice::Human) => {
                let notice = render(
                    &self.messages.admin_human_request,
                    &[
                        ("user_id", sender.id.as_str()),
                        ("username", sender.handle().as_str()),
                    ],
                );
                Step::new(SessionState::Idle)
                    .reply(&self.messages.human_ack, self.menu.main_keyboard())
                    .notify_admin(notice)
            }
            None => Step::new(SessionState::Idle)
                .reply(&self.messages.choose_action, self.menu.main_keyboard()),
        }
    }

    fn render_new_lead(&self, lead: &Lead) -> String {
        render(
            &self.messages.admin_new_lead,
            &[
                ("name", lead.name.as_str()),
                ("contact", lead.contact.as_str()),
                ("user_id", lead.user_id.as_str()),
                ("username", lead.handle().as_str()),
            ],
        )
    }

    /// Handles one inbound message end to end.
    pub async fn handle(
        &mut self,
        channel: &dyn ChannelAdapter,
        inbound: InboundMessage,
    ) -> Result<(), LeadbotError> {
        let user_id = inbound.sender.id.clone();
        let current = self.sessions.get(&user_id);
        let step = self.plan(&current, &inbound.sender, &inbound.content, Utc::now());

        for effect in step.effects {
            match effect {
                Effect::Reply { text, keyboard } => {
                    channel
                        .send(OutboundMessage {
                            channel: inbound.channel.clone(),
                            chat_id: inbound.chat_id.clone(),
                            content: text,
                            keyboard: Some(keyboard),
                        })
                        .await?;
                }
                Effect::NotifyAdmin(text) => {
                    channel
                        .send(OutboundMessage {
                            channel: inbound.channel.clone(),
                            chat_id: self.admin_chat_id.clone(),
                            content: text,
                            keyboard: None,
                        })
                        .await?;
                    debug!(user_id = user_id.as_str(), "administrator notified");
                }
                Effect::AppendLead(lead) => {
                    self.leads.append(&lead).await?;
                    info!(user_id = user_id.as_str(), "lead recorded");
                    debug!(name = lead.name.as_str(), contact = lead.contact.as_str(), "lead contents");
                }
            }
        }

        if current != step.next {
            debug!(
                user_id = user_id.as_str(),
                from = %current,
                to = %step.next,
                "session transition"
            );
        }
        self.sessions.set(&user_id, step.next);
        Ok(())
    }
}

/// Substitutes `{key}` placeholders in a template.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}
