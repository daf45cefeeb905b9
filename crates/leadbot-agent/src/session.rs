// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state.
//!
//! Each user is in exactly one state: Idle, AwaitingFaqQuery, AwaitingLeadName,
//! or AwaitingLeadContact. The pending lead name lives inside the
//! AwaitingLeadContact state, so it cannot outlive the intake flow.

use std::collections::HashMap;

/// States in the conversation FSM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Main menu shown; no flow in progress.
    #[default]
    Idle,
    /// The user picked FAQ and the next text is a question.
    AwaitingFaqQuery,
    /// Lead intake: waiting for the name.
    AwaitingLeadName,
    /// Lead intake: name stored, waiting for the contact.
    AwaitingLeadContact { name: String },
}

impl SessionState {
    /// The stored lead name, if intake has reached the contact step.
    pub fn pending_name(&self) -> Option<&str> {
        match self {
            SessionState::AwaitingLeadContact { name } => Some(name),
            _ => None,
        }
    }

    /// Returns true for the initial/terminal state.
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingFaqQuery => write!(f, "awaiting_faq_query"),
            SessionState::AwaitingLeadName => write!(f, "awaiting_lead_name"),
            SessionState::AwaitingLeadContact { .. } => write!(f, "awaiting_lead_contact"),
        }
    }
}

/// Explicit mapping from user identifier to conversation state.
///
/// Users without an entry are Idle. Storing Idle removes the entry, so the
/// map only ever holds users who are mid-flow. Conversations never expire.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `user_id` (Idle if unknown).
    pub fn get(&self, user_id: &str) -> SessionState {
        self.sessions.get(user_id).cloned().unwrap_or_default()
    }

    /// Replaces the state for `user_id`.
    pub fn set(&mut self, user_id: &str, state: SessionState) {
        if state.is_idle() {
            self.sessions.remove(user_id);
        } else {
            self.sessions.insert(user_id.to_string(), state);
        }
    }

    /// Number of users currently mid-flow.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_is_idle() {
        let store = SessionStore::new();
        assert_eq!(store.get("1"), SessionState::Idle);
    }

    #[test]
    fn set_idle_removes_entry() {
        let mut store = SessionStore::new();
        store.set("1", SessionState::AwaitingLeadName);
        assert_eq!(store.active_count(), 1);
        store.set("1", SessionState::Idle);
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn users_do_not_share_state() {
        let mut store = SessionStore::new();
        store.set("1", SessionState::AwaitingFaqQuery);
        store.set(
            "2",
            SessionState::AwaitingLeadContact {
                name: "Анна".into(),
            },
        );
        assert_eq!(store.get("1"), SessionState::AwaitingFaqQuery);
        assert_eq!(store.get("2").pending_name(), Some("Анна"));
        store.set("2", SessionState::Idle);
        assert!(store.get("2").is_idle());
        assert_eq!(store.get("1"), SessionState::AwaitingFaqQuery);
    }

    #[test]
    fn display_names() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(
            SessionState::AwaitingLeadContact { name: "x".into() }.to_string(),
            "awaiting_lead_contact"
        );
    }
}
